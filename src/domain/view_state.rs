use crate::domain::chart::ChartModel;
use crate::domain::errors::ViewError;
use crate::domain::formatting::ResultFields;
use crate::domain::prediction::PredictionResponse;

/// Everything the results panel and the chart need after a successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub response: PredictionResponse,
    pub fields: ResultFields,
    pub chart: ChartModel,
}

impl PredictionView {
    /// Builds the chart before anything else so a bad payload yields no view at all.
    pub fn from_response(response: PredictionResponse) -> Result<Self, ViewError> {
        let chart = ChartModel::build(&response)?;
        let fields = ResultFields::from_response(&response);
        Ok(Self {
            response,
            fields,
            chart,
        })
    }
}

/// Mutually exclusive UI phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(Box<PredictionView>),
}

impl ViewState {
    pub fn from_error(err: &ViewError) -> Self {
        ViewState::Error(err.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&PredictionView> {
        match self {
            ViewState::Success(view) => Some(&**view),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Success(_) => "success",
        }
    }
}
