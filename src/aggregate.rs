use std::io::Write;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::CloneError;
use crate::tui::Console;
use crate::worker::CloneResult;

/// A repository that did not clone, kept for the final listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedClone {
    pub source: String,
    pub display_url: String,
    pub error: CloneError,
}

/// Tally of one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinalReport {
    pub total: usize,
    pub succeeded: usize,
    /// In arrival order
    pub failures: Vec<FailedClone>,
}

impl FinalReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Drain results until every worker is done.
///
/// Successes print a progress line as they arrive; failures are held back
/// for the summary. Arrival order is whatever the channel delivers.
pub async fn drain<W: Write>(
    mut rx: mpsc::Receiver<CloneResult>,
    total: usize,
    console: &mut Console<W>,
) -> std::io::Result<FinalReport> {
    let mut report = FinalReport {
        total,
        ..FinalReport::default()
    };
    let mut finished = 0;

    while let Some(result) = rx.recv().await {
        finished += 1;
        match result.error {
            Some(error) => {
                debug!(repo = %result.display_url, "not cloned: {}", error.detail().trim_end());
                report.failures.push(FailedClone {
                    source: result.source,
                    display_url: result.display_url,
                    error,
                });
            }
            None => {
                report.succeeded += 1;
                console.progress(&result.display_url, result.succeeded_at_completion, total)?;
            }
        }
        console.set_spinner_message(format!("{finished}/{total} finished"));
    }

    Ok(report)
}
