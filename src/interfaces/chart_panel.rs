use crate::application::viewer::ChartHandle;
use crate::domain::chart::ChartModel;
use crate::domain::formatting::{format_axis_price, format_tooltip};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, Points};

pub const HISTORICAL_SERIES: &str = "Historical Price";
pub const FORECAST_SERIES: &str = "Predicted Price";

/// Historical prices as plot points at x = label index.
pub fn historical_points(model: &ChartModel) -> Vec<[f64; 2]> {
    model
        .historical_series
        .iter()
        .enumerate()
        .map(|(i, (_, price))| [i as f64, *price])
        .collect()
}

/// Only the present forecast entries become points, so the marker stands alone.
pub fn forecast_points(model: &ChartModel) -> Vec<[f64; 2]> {
    model
        .forecast_series
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| [i as f64, v]))
        .collect()
}

/// Hover text for both series at the label nearest to `x`.
pub fn hover_lines(model: &ChartModel, x: f64) -> Option<(String, Vec<String>)> {
    let index = x.round();
    let date = model.label_at(index)?.to_string();
    let i = index as usize;
    let historical = model.historical_series.get(i).map(|(_, v)| *v);
    let forecast = model.forecast_series.get(i).copied().flatten();
    Some((
        date,
        vec![
            format_tooltip(HISTORICAL_SERIES, historical),
            format_tooltip(FORECAST_SERIES, forecast),
        ],
    ))
}

pub fn render_chart_panel(handle: &ChartHandle, ui: &mut egui::Ui) {
    let model = handle.model.as_ref();

    ui.label(
        egui::RichText::new(&model.title)
            .strong()
            .size(16.0)
            .color(DesignSystem::TEXT_PRIMARY),
    );
    ui.add_space(8.0);

    let x_model = handle.model.clone();
    let height = ui.available_height() - 60.0;

    let response = Plot::new(handle.plot_id())
        .height(height.max(300.0))
        .show_grid([true, true])
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label("Date")
        .y_axis_label("Price (₹)")
        .x_axis_formatter(move |mark, _range| {
            x_model
                .label_at(mark.value)
                .map(str::to_string)
                .unwrap_or_default()
        })
        .y_axis_formatter(|mark, _range| format_axis_price(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(HISTORICAL_SERIES, historical_points(model))
                    .color(DesignSystem::HISTORICAL_LINE)
                    .width(2.0_f32)
                    .fill(0.0_f32),
            );
            plot_ui.points(
                Points::new(FORECAST_SERIES, forecast_points(model))
                    .color(DesignSystem::FORECAST_MARKER)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(9.0_f32),
            );
            plot_ui.pointer_coordinate().map(|p| p.x)
        });

    // Tooltip row under the plot, one entry per series
    let hovered = response.inner.and_then(|x| hover_lines(model, x));
    ui.horizontal(|ui| match hovered {
        Some((date, lines)) => {
            ui.label(egui::RichText::new(date).strong().color(DesignSystem::TEXT_PRIMARY));
            for line in lines {
                ui.separator();
                ui.label(egui::RichText::new(line).color(DesignSystem::TEXT_SECONDARY));
            }
        }
        None => {
            ui.label(
                egui::RichText::new("Hover the chart for prices")
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}
