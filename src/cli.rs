use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "git-multi",
    about = "git-multi clones multiple git repositories in parallel",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clone multiple git repositories in parallel
    Multiclone {
        /// SSH repository URLs (git@github.com:owner/repo.git)
        repos: Vec<String>,

        /// Result buffer size, i.e. how many finished clones may queue up unreported
        #[arg(
            short,
            long,
            alias = "maxgoroutine",
            default_value_t = crate::config::MAX_CONCURRENCY,
            value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
        )]
        concurrency: usize,

        /// Host expected in SSH URLs and used for HTTPS display URLs
        #[arg(long, default_value = crate::config::GITHUB_HOST)]
        host: String,

        /// Show clone output under each failed repository
        #[arg(short, long)]
        verbose: bool,
    },
}
