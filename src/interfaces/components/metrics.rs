use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// One result field: caption on top, large value below.
pub fn render_metric_card(ui: &mut egui::Ui, title: &str, value: &str, value_color: egui::Color32) {
    Card::new().title(title).min_height(80.0).show(ui, |ui| {
        ui.label(
            egui::RichText::new(value)
                .size(24.0)
                .strong()
                .color(value_color),
        );
    });
}

/// Decision label on a tinted pill coloured by its style class.
pub fn render_decision_badge(ui: &mut egui::Ui, label: &str, decision_class: &str) {
    let color = DesignSystem::decision_color(decision_class);
    Card::new()
        .title("Decision")
        .min_height(80.0)
        .accent(color)
        .show(ui, |ui| {
            egui::Frame::NONE
                .fill(color.linear_multiply(0.15))
                .corner_radius(12)
                .inner_margin(egui::Margin::symmetric(12, 4))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(label).size(20.0).strong().color(color));
                });
        });
}
