mod aggregate;
mod cli;
mod cloner;
mod config;
mod dispatch;
mod error;
mod pipeline;
mod translate;
mod tui;
mod worker;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{Cli, Command};
use config::CloneConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Multiclone {
            repos,
            concurrency,
            host,
            verbose,
        } => {
            let config = CloneConfig::new(host, concurrency, verbose);
            pipeline::run(repos, &config).await
        }
    };

    if let Err(e) = result {
        eprintln!("\n  \x1b[31m✗\x1b[0m {e:#}\n");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout keeps the report format; `RUST_LOG` overrides the level.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
