//! Headless prediction runner
//!
//! Sends one request through the same controller the viewer uses and prints the
//! formatted result fields, or the chart model as JSON.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict -- --stock TCS --start 2023-01-01 --end 2024-12-31
//! PREDICT_MODE=mock cargo run --bin predict -- --stock INFY --json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use stockcast::application::request_controller::RequestController;
use stockcast::config::Config;
use stockcast::domain::prediction::PredictionRequest;
use stockcast::domain::view_state::ViewState;
use stockcast::infrastructure::ServiceFactory;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Run one stock price prediction", long_about = None)]
struct Cli {
    /// Stock symbol
    #[arg(short, long)]
    stock: Option<String>,

    /// Start date (YYYY-MM-DD); defaults to PREDICT_DEFAULT_START
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to PREDICT_DEFAULT_END
    #[arg(long)]
    end: Option<String>,

    /// Print the chart model as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let stock = cli
        .stock
        .or_else(|| config.symbols.first().cloned())
        .unwrap_or_default();
    let request = PredictionRequest::new(
        stock,
        cli.start.unwrap_or_else(|| config.default_start.clone()),
        cli.end.unwrap_or_else(|| config.default_end.clone()),
    )?;

    let service = ServiceFactory::create_service(&config)?;
    let mut controller = RequestController::new(config.fencing);
    info!("Requesting prediction for {}", request.stock);

    match controller.run(service.as_ref(), &request).await {
        ViewState::Success(view) => {
            if cli.json {
                let json = serde_json::to_string_pretty(&view.chart)
                    .context("Failed to serialize chart model")?;
                println!("{}", json);
            } else {
                let f = &view.fields;
                println!("{}", f.stock_name);
                println!("  Current price:   {}", f.current_price);
                println!("  Predicted price: {}", f.predicted_price);
                println!("  Change:          {} ({:?})", f.price_change, f.trend);
                println!("  Confidence:      {}", f.confidence);
                println!("  Decision:        {}", f.decision);
                if let (Some(label), Some(value)) =
                    (view.chart.forecast_label(), view.chart.forecast_value())
                {
                    println!("  Forecast point:  {} @ {:.2}", label, value);
                }
            }
            Ok(())
        }
        ViewState::Error(message) => anyhow::bail!("{}", message),
        other => anyhow::bail!("Prediction ended in unexpected state: {}", other.name()),
    }
}
