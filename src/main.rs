use anyhow::Result;
use clap::Parser;
use receipt_renamer::app::App;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "receipt-renamer")]
#[command(about = "Rename receipt images using a vision-language model")]
struct CliArgs {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_renamer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting receipt-renamer");

    CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run().await {
            Ok(summary) => {
                info!(
                    "Batch completed: {}/{} files renamed",
                    summary.successes(),
                    summary.total()
                );
                Ok(())
            }
            Err(e) => {
                error!("Batch failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
