use std::io::Write;
use std::sync::Arc;

use tracing::info;

use crate::aggregate::{self, FinalReport};
use crate::cloner::git::GitCloner;
use crate::cloner::Cloner;
use crate::config::CloneConfig;
use crate::dispatch;
use crate::error::MultiError;
use crate::translate;
use crate::tui::Console;

/// Clone every repository with the VCS binary and print the report to stdout.
pub async fn run(repos: Vec<String>, config: &CloneConfig) -> Result<FinalReport, MultiError> {
    config.validate()?;
    let cloner = Arc::new(GitCloner::from_config(config));
    let mut console = Console::stdout();
    multiclone(repos, config, cloner, &mut console).await
}

/// One full pass: header, fan-out, drain, summary.
pub async fn multiclone<W: Write>(
    repos: Vec<String>,
    config: &CloneConfig,
    cloner: Arc<dyn Cloner>,
    console: &mut Console<W>,
) -> Result<FinalReport, MultiError> {
    let total = repos.len();
    let pending: Vec<String> = repos
        .iter()
        .map(|r| translate::display_name(r, &config.host))
        .collect();
    console.header(&pending)?;

    info!(total, concurrency = config.concurrency, program = %config.program, "starting multiclone");
    let rx = dispatch::run(repos, config.concurrency, cloner, &config.host);

    console.start_spinner("cloning...");
    let drained = aggregate::drain(rx, total, console).await;
    console.finish_spinner();
    let report = drained?;

    console.separator()?;
    console.summary(&report, config.verbose)?;
    console.flush()?;

    info!(
        succeeded = report.succeeded,
        failed = report.failed(),
        "multiclone finished"
    );
    Ok(report)
}
