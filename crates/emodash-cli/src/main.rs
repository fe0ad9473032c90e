mod analyze;
mod render;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "emodash")]
#[command(about = "Sentiment and emotion dashboard for batches of text")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify every line of an uploaded CSV or pasted text and print the dashboard
    Analyze {
        /// CSV file with a `text` column; takes priority over pasted text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Newline-separated texts to analyze
        #[arg(long, conflicts_with = "stdin")]
        text: Option<String>,

        /// Read newline-separated texts from standard input
        #[arg(long)]
        stdin: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Number of recent-message cards to show (defaults to `EMODASH_PREVIEW_LIMIT`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Connect to both classifier servers and print the models they serve
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = emodash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env.colored_logs())
        .init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Analyze {
            file,
            text,
            stdin,
            json,
            limit,
        } => {
            let input = analyze::AnalyzeInput {
                file,
                text,
                stdin,
                json,
                limit,
            };
            analyze::run_analyze(&config, input).await?;
        }
        Commands::Check => analyze::run_check(&config).await?,
    }

    Ok(())
}
