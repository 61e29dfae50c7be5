use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Cloner;
use crate::error::CloneError;

/// Mock cloner for testing. Succeeds unless a failure is registered for the source.
#[derive(Default)]
pub struct MockCloner {
    failures: HashMap<String, String>,
    panics: Vec<String>,
    call_count: AtomicUsize,
}

impl MockCloner {
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Fail `source` with `detail` as the captured output
    pub fn failing_on(mut self, source: &str, detail: &str) -> Self {
        self.failures.insert(source.to_string(), detail.to_string());
        self
    }

    /// Panic while cloning `source`
    pub fn panicking_on(mut self, source: &str) -> Self {
        self.panics.push(source.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Cloner for MockCloner {
    fn clone_repo(
        &self,
        source: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), CloneError>> + Send + '_>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if self.panics.iter().any(|p| p == source) {
            panic!("mock cloner: panic on {source}");
        }

        let outcome = match self.failures.get(source) {
            Some(detail) => Err(CloneError::SubprocessFailure {
                detail: detail.clone(),
            }),
            None => Ok(()),
        };
        Box::pin(async move {
            // Let other workers interleave
            tokio::task::yield_now().await;
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn succeeds_by_default() {
        let cloner = MockCloner::succeeding();
        assert!(cloner.clone_repo("git@github.com:a/b.git").await.is_ok());
        assert_eq!(cloner.call_count(), 1);
    }

    #[tokio::test]
    async fn registered_failure() {
        let cloner = MockCloner::succeeding().failing_on("x", "fatal: repository not found");
        assert_eq!(
            cloner.clone_repo("x").await,
            Err(CloneError::SubprocessFailure {
                detail: "fatal: repository not found".into()
            })
        );
        assert!(cloner.clone_repo("y").await.is_ok());
        assert_eq!(cloner.call_count(), 2);
    }
}
