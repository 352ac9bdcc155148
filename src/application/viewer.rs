use crate::application::client::{ClientEvent, PredictionClient};
use crate::application::request_controller::{Applied, RequestController};
use crate::config::Config;
use crate::domain::chart::ChartModel;
use crate::domain::prediction::PredictionRequest;
use crate::domain::view_state::ViewState;
use std::collections::VecDeque;
use std::sync::Arc;

const MAX_LOG_LINES: usize = 500;

/// The chart currently on screen.
///
/// A new handle is created for every successful prediction; the generation keys
/// the plot widget so no zoom or hover state carries over from the previous chart.
#[derive(Debug, Clone)]
pub struct ChartHandle {
    pub model: Arc<ChartModel>,
    pub generation: u64,
}

impl ChartHandle {
    pub fn plot_id(&self) -> String {
        format!("price_chart_{}", self.generation)
    }
}

/// UI-side state of the prediction page: form inputs, the controller and the chart slot.
pub struct PredictionViewer {
    client: PredictionClient,
    controller: RequestController,

    // Form
    pub symbols: Vec<String>,
    pub stock: String,
    pub start_date: String,
    pub end_date: String,

    chart: Option<ChartHandle>,
    chart_generation: u64,
    pub log_lines: VecDeque<String>,
    pub show_logs: bool,
}

impl PredictionViewer {
    pub fn new(client: PredictionClient, config: &Config) -> Self {
        Self {
            client,
            controller: RequestController::new(config.fencing),
            stock: config.symbols.first().cloned().unwrap_or_default(),
            symbols: config.symbols.clone(),
            start_date: config.default_start.clone(),
            end_date: config.default_end.clone(),
            chart: None,
            chart_generation: 0,
            log_lines: VecDeque::new(),
            show_logs: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn chart(&self) -> Option<&ChartHandle> {
        self.chart.as_ref()
    }

    /// Reads the form and fires a request. Prior results vanish immediately.
    pub fn submit(&mut self) {
        self.chart = None;
        match PredictionRequest::new(&self.stock, &self.start_date, &self.end_date) {
            Ok(request) => {
                let token = self.controller.submit(&request);
                self.client.dispatch(token, request);
            }
            Err(err) => self.controller.reject(&err),
        }
    }

    /// Drains everything the background runtime delivered since the last frame.
    pub fn process_events(&mut self) {
        while let Some(event) = self.client.poll_next() {
            match event {
                ClientEvent::Completion(completion) => {
                    if self.controller.complete(completion.token, completion.outcome)
                        == Applied::Applied
                    {
                        self.sync_chart();
                    }
                }
                ClientEvent::Log(line) => {
                    self.log_lines.push_back(line);
                    while self.log_lines.len() > MAX_LOG_LINES {
                        self.log_lines.pop_front();
                    }
                }
            }
        }
    }

    // Swaps the chart in one assignment so there is never a half-replaced chart
    fn sync_chart(&mut self) {
        self.chart = match self.controller.state().view() {
            Some(view) => {
                self.chart_generation += 1;
                Some(ChartHandle {
                    model: Arc::new(view.chart.clone()),
                    generation: self.chart_generation,
                })
            }
            None => None,
        };
    }
}
