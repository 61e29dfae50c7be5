pub mod git;
#[cfg(test)]
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use crate::error::CloneError;

/// Async trait for cloning one repository (the VCS binary or a mock).
/// Uses boxed future for dyn compatibility.
pub trait Cloner: Send + Sync {
    /// Clone `source`. `Err` carries the failure detail.
    fn clone_repo(
        &self,
        source: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), CloneError>> + Send + '_>>;
}
