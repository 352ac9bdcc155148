use crate::application::viewer::PredictionViewer;
use crate::interfaces::chart_panel::render_chart_panel;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::{render_decision_badge, render_metric_card};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::prediction_view_model::PredictionViewModel;
use eframe::egui;
use std::time::Duration;

impl eframe::App for PredictionViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        // --- 1. Apply completed calls and log lines ---
        self.process_events();
        let visibility = PredictionViewModel::visibility(self.state());

        // --- 2. Header ---
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("📈 Stock Price Prediction")
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_logs, "Logs");
                });
            });
        });

        // --- 3. Optional log panel ---
        if self.show_logs {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .stick_to_bottom(true)
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for line in &self.log_lines {
                                ui.label(
                                    egui::RichText::new(line.trim_end())
                                        .monospace()
                                        .size(11.0)
                                        .color(DesignSystem::TEXT_SECONDARY),
                                );
                            }
                        });
                });
        }

        // --- 4. Main page ---
        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        render_form(self, ui, visibility.loading);
                        ui.add_space(DesignSystem::SPACING_MEDIUM);

                        if visibility.loading {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(
                                    egui::RichText::new("Training model and predicting…")
                                        .color(DesignSystem::TEXT_SECONDARY),
                                );
                            });
                        }

                        if visibility.error
                            && let Some(message) = self.state().error_message()
                        {
                            render_error_banner(ui, message);
                        }

                        if visibility.results
                            && let Some(view) = self.state().view()
                        {
                            let metrics = PredictionViewModel::get_metrics(&view.fields);
                            ui.columns(5, |columns| {
                                render_metric_card(
                                    &mut columns[0],
                                    "Current Price",
                                    metrics.current_price,
                                    DesignSystem::TEXT_PRIMARY,
                                );
                                render_metric_card(
                                    &mut columns[1],
                                    "Predicted Price",
                                    metrics.predicted_price,
                                    DesignSystem::TEXT_PRIMARY,
                                );
                                render_metric_card(
                                    &mut columns[2],
                                    "Expected Change",
                                    metrics.price_change,
                                    metrics.change_color,
                                );
                                render_metric_card(
                                    &mut columns[3],
                                    "Confidence",
                                    metrics.confidence,
                                    DesignSystem::ACCENT_PRIMARY,
                                );
                                render_decision_badge(
                                    &mut columns[4],
                                    metrics.decision,
                                    metrics.decision_class,
                                );
                            });
                            ui.add_space(DesignSystem::SPACING_MEDIUM);
                        }

                        if visibility.chart
                            && let Some(handle) = self.chart()
                        {
                            Card::new().min_height(420.0).show(ui, |ui| {
                                render_chart_panel(handle, ui);
                            });
                        }
                    });
            });

        // Keep polling while a call is out
        if visibility.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn render_form(viewer: &mut PredictionViewer, ui: &mut egui::Ui, loading: bool) {
    let mut submit = false;

    Card::new().title("Prediction Request").show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label("Stock");
            egui::ComboBox::from_id_salt("stock_selector")
                .selected_text(viewer.stock.clone())
                .show_ui(ui, |ui| {
                    for symbol in &viewer.symbols {
                        ui.selectable_value(&mut viewer.stock, symbol.clone(), symbol);
                    }
                });

            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.label("Start date");
            ui.add(egui::TextEdit::singleline(&mut viewer.start_date).desired_width(100.0));

            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.label("End date");
            ui.add(egui::TextEdit::singleline(&mut viewer.end_date).desired_width(100.0));

            ui.add_space(DesignSystem::SPACING_SMALL);
            let label = if loading { "Predicting…" } else { "Predict" };
            // Stays clickable while loading; a resubmission simply restarts
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .fill(DesignSystem::ACCENT_PRIMARY.linear_multiply(0.25));
            if ui.add(button).clicked() {
                submit = true;
            }
        });
    });

    if submit {
        viewer.submit();
    }
}

fn render_error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(DesignSystem::ERROR_BG)
        .corner_radius(DesignSystem::ROUNDING_MEDIUM)
        .stroke(egui::Stroke::new(1.0, DesignSystem::NEGATIVE))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(DesignSystem::NEGATIVE));
        });
    ui.add_space(DesignSystem::SPACING_MEDIUM);
}
