use anyhow::Context;
use url::Url;

/// Host used when `--host` is not given
pub const GITHUB_HOST: &str = "github.com";
/// SSH user every recognised source reference starts with
pub const SSH_USER: &str = "git";
/// Suffix every recognised source reference ends with
pub const GIT_SUFFIX: &str = ".git";

/// Behavior constants
pub const MAX_CONCURRENCY: usize = 10;
pub const SEPARATOR_WIDTH: usize = 100;

/// Environment variable overriding the VCS executable
pub const VCS_ENV: &str = "GIT_MULTI_GIT";
pub const DEFAULT_VCS: &str = "git";

/// Configuration for one multiclone run (CLI flags plus environment)
#[derive(Debug, Clone)]
pub struct CloneConfig {
    /// VCS executable invoked as `<program> clone <source>`
    pub program: String,
    /// Host expected in SSH references and used for display URLs
    pub host: String,
    /// Result channel capacity
    pub concurrency: usize,
    /// Print failure details in the final listing
    pub verbose: bool,
}

impl CloneConfig {
    pub fn new(host: String, concurrency: usize, verbose: bool) -> Self {
        Self {
            program: vcs_from_env(),
            host,
            concurrency,
            verbose,
        }
    }

    /// Check that the host yields a usable HTTPS base URL
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        https_base(&self.host).with_context(|| format!("invalid host '{}'", self.host))?;
        Ok(())
    }
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_VCS.to_string(),
            host: GITHUB_HOST.to_string(),
            concurrency: MAX_CONCURRENCY,
            verbose: false,
        }
    }
}

/// Resolve the VCS executable from the environment
pub fn vcs_from_env() -> String {
    std::env::var(VCS_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_VCS.to_string())
}

/// `https://<host>/`, the base display URLs are joined onto
pub fn https_base(host: &str) -> Result<Url, url::ParseError> {
    let base = Url::parse(&format!("https://{host}/"))?;
    // Host must not carry a path or userinfo
    if base.host_str().is_none() || base.path() != "/" || !base.username().is_empty() {
        return Err(url::ParseError::InvalidDomainCharacter);
    }
    Ok(base)
}

/// `git@<host>:`, the prefix every recognised source reference carries
pub fn ssh_prefix(host: &str) -> String {
    format!("{SSH_USER}@{host}:")
}
