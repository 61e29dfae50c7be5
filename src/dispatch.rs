use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::cloner::Cloner;
use crate::error::CloneError;
use crate::translate;
use crate::worker::{self, CloneResult};

/// Fan the jobs out to one worker task each and return the result stream.
///
/// `concurrency` only sizes the channel buffer; every job is spawned at once
/// and a full buffer holds workers back at their send. The channel closes
/// once the supervisor has joined every worker.
pub fn run(
    jobs: Vec<String>,
    concurrency: usize,
    cloner: Arc<dyn Cloner>,
    host: &str,
) -> mpsc::Receiver<CloneResult> {
    let (tx, rx) = mpsc::channel(concurrency.max(1));
    let counter = Arc::new(AtomicUsize::new(0));
    let host: Arc<str> = Arc::from(host);

    debug!(jobs = jobs.len(), concurrency, "dispatching clone jobs");

    let mut workers: Vec<(String, JoinHandle<()>)> = Vec::with_capacity(jobs.len());
    for source in jobs {
        let handle = tokio::spawn(worker::run(
            source.clone(),
            tx.clone(),
            counter.clone(),
            cloner.clone(),
            host.clone(),
        ));
        workers.push((source, handle));
    }

    // The supervisor holds the last sender; dropping it closes the channel.
    tokio::spawn(supervise(workers, tx, counter, host));

    rx
}

/// Wait for every worker, standing in for any that died without reporting.
async fn supervise(
    workers: Vec<(String, JoinHandle<()>)>,
    tx: mpsc::Sender<CloneResult>,
    counter: Arc<AtomicUsize>,
    host: Arc<str>,
) {
    for (source, handle) in workers {
        let Err(e) = handle.await else {
            continue;
        };
        error!(%source, "clone worker panicked: {e}");
        let result = CloneResult {
            display_url: translate::display_name(&source, &host),
            source,
            succeeded_at_completion: counter.load(Ordering::SeqCst),
            error: Some(CloneError::Aborted(e.to_string())),
        };
        if tx.send(result).await.is_err() {
            debug!("result receiver dropped");
        }
    }
    debug!("all clone workers finished");
}
