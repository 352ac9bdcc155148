use crate::domain::formatting::ResultFields;
use crate::domain::view_state::ViewState;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

pub struct ResultMetrics<'a> {
    pub current_price: &'a str,
    pub predicted_price: &'a str,
    pub price_change: &'a str,
    pub change_color: egui::Color32,
    pub confidence: &'a str,
    pub decision: &'a str,
    pub decision_class: &'a str,
}

/// Which page sections are visible for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub loading: bool,
    pub error: bool,
    pub results: bool,
    pub chart: bool,
}

pub struct PredictionViewModel;

impl PredictionViewModel {
    pub fn visibility(state: &ViewState) -> Visibility {
        let success = state.view().is_some();
        Visibility {
            loading: state.is_loading(),
            error: state.error_message().is_some(),
            results: success,
            chart: success,
        }
    }

    pub fn get_metrics(fields: &ResultFields) -> ResultMetrics<'_> {
        ResultMetrics {
            current_price: &fields.current_price,
            predicted_price: &fields.predicted_price,
            price_change: &fields.price_change,
            change_color: DesignSystem::trend_color(fields.trend),
            confidence: &fields.confidence,
            decision: &fields.decision,
            decision_class: &fields.decision_class,
        }
    }
}
