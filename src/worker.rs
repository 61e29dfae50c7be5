use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::cloner::Cloner;
use crate::error::CloneError;
use crate::translate;

/// Outcome of one clone job, sent exactly once per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneResult {
    /// Raw source reference the job was created from
    pub source: String,
    /// HTTPS display URL, or the raw source when it does not translate
    pub display_url: String,
    /// Shared success count observed right after this job finished
    pub succeeded_at_completion: usize,
    pub error: Option<CloneError>,
}

/// Run one clone job and report it on `tx`.
///
/// Exactly one result is sent whatever the outcome. The counter is bumped
/// before the send, so the aggregator never sees a success the counter
/// does not yet include.
pub async fn run(
    source: String,
    tx: mpsc::Sender<CloneResult>,
    counter: Arc<AtomicUsize>,
    cloner: Arc<dyn Cloner>,
    host: Arc<str>,
) {
    let result = clone_one(source, &counter, cloner.as_ref(), &host).await;
    if tx.send(result).await.is_err() {
        debug!("result receiver dropped");
    }
}

async fn clone_one(
    source: String,
    counter: &AtomicUsize,
    cloner: &dyn Cloner,
    host: &str,
) -> CloneResult {
    let display_url = match translate::translate(&source, host) {
        Ok(url) => url,
        Err(e) => {
            debug!(%source, "skipping untranslatable source");
            return CloneResult {
                display_url: source.clone(),
                source,
                succeeded_at_completion: counter.load(Ordering::SeqCst),
                error: Some(e),
            };
        }
    };

    match cloner.clone_repo(&source).await {
        Ok(()) => {
            let succeeded = counter.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(%display_url, succeeded, "cloned");
            CloneResult {
                source,
                display_url,
                succeeded_at_completion: succeeded,
                error: None,
            }
        }
        Err(e) => CloneResult {
            source,
            display_url,
            succeeded_at_completion: counter.load(Ordering::SeqCst),
            error: Some(e),
        },
    }
}
