mod generate;
mod models;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "leadgen")]
#[command(about = "Find potential leads in forum discussions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search forum pages for a lead profile and export the interactions found
    Generate(GenerateArgs),
    /// List Gemini models that support content generation
    Models {
        /// Show what this choice resolves to ("auto" or a model id)
        #[arg(long, default_value = "auto")]
        model: leadgen_gemini::ModelChoice,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = leadgen_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => {
            tokio::select! {
                result = generate::run_generate(&config, args) => result,
                () = shutdown_signal() => {
                    anyhow::bail!("run cancelled; no leads were written")
                }
            }
        }
        Commands::Models { model } => models::run_models(&config, &model).await,
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, cancelling run");
}

#[cfg(test)]
mod tests;
