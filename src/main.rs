use stockcast::application::client::PredictionClient;
use stockcast::application::viewer::PredictionViewer;
use stockcast::config::Config;
use stockcast::infrastructure::ServiceFactory;

use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 1. Logging (stdout + in-app log panel)
    let (log_tx, log_rx) = crossbeam_channel::bounded(1024);

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Stockcast {} starting...", env!("CARGO_PKG_VERSION"));

    // 2. Config + service
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Mode={:?}, API={}, Fencing={:?}",
        config.mode, config.api_url, config.fencing
    );
    let service = ServiceFactory::create_service(&config)?;

    // 3. Background runtime for prediction calls; the UI owns the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    let client = PredictionClient::new(runtime.handle().clone(), service).with_log_receiver(log_rx);
    let viewer = PredictionViewer::new(client, &config);

    // 4. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_title("Stock Price Prediction"),
        ..Default::default()
    };

    eframe::run_native(
        "Stockcast",
        native_options,
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    runtime.shutdown_background();
    Ok(())
}
