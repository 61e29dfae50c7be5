use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::Cloner;
use crate::config::CloneConfig;
use crate::error::CloneError;

/// Cloner that spawns `<program> clone <source>` as a subprocess.
pub struct GitCloner {
    program: String,
}

impl GitCloner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &CloneConfig) -> Self {
        Self::new(config.program.clone())
    }

    async fn clone_impl(&self, source: &str) -> Result<(), CloneError> {
        debug!(program = %self.program, %source, "spawning clone");

        // TODO: per-job timeout; a hung clone currently blocks the whole run.
        let output = Command::new(&self.program)
            .args(["clone", source])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CloneError::SubprocessFailure {
                detail: format!("failed to spawn {}: {e}", self.program),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(%source, code = ?output.status.code(), "clone exited non-zero");
        Err(CloneError::SubprocessFailure {
            detail: format!("{stdout}{stderr}"),
        })
    }
}

impl Cloner for GitCloner {
    fn clone_repo(
        &self,
        source: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), CloneError>> + Send + '_>> {
        let source = source.to_string();
        Box::pin(async move { self.clone_impl(&source).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn fake_vcs(script: &str) -> tempfile::TempPath {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let mut f = tempfile::Builder::new()
            .prefix("fake-git")
            .tempfile()
            .unwrap();
        writeln!(f, "#!/bin/sh\n{script}").unwrap();
        f.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o755))
            .unwrap();
        // Close the handle so exec does not hit ETXTBSY
        f.into_temp_path()
    }

    #[tokio::test]
    async fn exit_zero_is_success() {
        let cloner = GitCloner::new("true");
        assert!(cloner.clone_repo("git@github.com:acme/widgets.git").await.is_ok());
    }

    #[tokio::test]
    async fn exit_non_zero_is_failure() {
        let cloner = GitCloner::new("false");
        let err = cloner
            .clone_repo("git@github.com:acme/widgets.git")
            .await
            .unwrap_err();
        assert!(matches!(err, CloneError::SubprocessFailure { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_failure() {
        let cloner = GitCloner::new("/nonexistent/git-multi-vcs");
        let err = cloner.clone_repo("git@github.com:a/b.git").await.unwrap_err();
        match err {
            CloneError::SubprocessFailure { detail } => {
                assert!(detail.starts_with("failed to spawn /nonexistent/git-multi-vcs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_detail_is_combined_output() {
        let script = fake_vcs("echo \"Cloning into '$2'...\"\necho 'fatal: repository not found' >&2\nexit 128");
        let cloner = GitCloner::new(script.to_str().unwrap());
        let err = cloner.clone_repo("git@github.com:a/b.git").await.unwrap_err();
        assert_eq!(
            err,
            CloneError::SubprocessFailure {
                detail: "Cloning into 'git@github.com:a/b.git'...\nfatal: repository not found\n"
                    .into()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_clone_and_source_as_arguments() {
        let script = fake_vcs("[ \"$1\" = clone ] && [ \"$2\" = 'git@github.com:a/b.git' ]");
        let cloner = GitCloner::new(script.to_str().unwrap());
        assert!(cloner.clone_repo("git@github.com:a/b.git").await.is_ok());
        assert!(cloner.clone_repo("git@github.com:a/c.git").await.is_err());
    }
}
