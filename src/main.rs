use clap::Parser;
use configuration::ConfigArgs;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod pipeline;

/// The main entry point for the billing ETL.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine; everything has a default or comes from config.toml.
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    match pipeline::run(&cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Loads the client, product and invoice CSV exports into PostgreSQL and prints
/// the top product and the clients ranked by total billed.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {}", e);
    }
}
