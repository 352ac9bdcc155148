use crate::domain::formatting::Trend;
use eframe::egui;

/// Light theme for the prediction page
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
    pub const BG_CARD: egui::Color32 = egui::Color32::WHITE;
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);

    // Accents
    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(102, 126, 234); // #667EEA

    // Chart series
    pub const HISTORICAL_LINE: egui::Color32 = egui::Color32::from_rgb(102, 126, 234); // #667EEA
    pub const FORECAST_MARKER: egui::Color32 = egui::Color32::from_rgb(16, 185, 129); // #10B981

    // Status
    pub const POSITIVE: egui::Color32 = egui::Color32::from_rgb(16, 185, 129); // #10B981
    pub const NEGATIVE: egui::Color32 = egui::Color32::from_rgb(239, 68, 68); // #EF4444
    pub const HOLD: egui::Color32 = egui::Color32::from_rgb(245, 158, 11); // #F59E0B
    pub const ERROR_BG: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);

    // Text
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(107);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(156);

    // Borders
    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);

    // --- Metrics ---

    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    // --- Styles ---

    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::light();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_WINDOW;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }

    pub fn trend_color(trend: Trend) -> egui::Color32 {
        egui::Color32::from_hex(trend.color_hex()).unwrap_or(match trend {
            Trend::Positive => Self::POSITIVE,
            Trend::Negative => Self::NEGATIVE,
        })
    }

    /// Colour for a decision style class such as `decision BUY`.
    pub fn decision_color(decision_class: &str) -> egui::Color32 {
        match decision_class.rsplit(' ').next().unwrap_or_default() {
            "BUY" => Self::POSITIVE,
            "SELL" => Self::NEGATIVE,
            "HOLD" => Self::HOLD,
            _ => Self::TEXT_SECONDARY,
        }
    }
}
