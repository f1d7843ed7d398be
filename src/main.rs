use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod source;
mod tracker;

#[derive(Parser)]
#[command(name = "harvest-watch")]
#[command(author, version, about = "Track the progress of background harvest tasks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll task status until every task reaches a terminal state
    Track {
        /// Task ids to track
        #[arg(required = true)]
        task_ids: Vec<String>,

        /// Server base URL (overrides server.base_url)
        #[arg(long)]
        base_url: Option<String>,

        /// Delay between polls in milliseconds (overrides polling.interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Check task status once
    Status {
        /// Task id to check
        task_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Server base URL (overrides server.base_url)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Track {
            task_ids,
            base_url,
            interval_ms,
        } => {
            init_logging();
            cli::track::run(task_ids, base_url, interval_ms).await
        }
        Commands::Status {
            task_id,
            json,
            base_url,
        } => {
            init_logging();
            cli::status::run(task_id, json, base_url).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
