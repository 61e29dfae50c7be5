use crate::config::{https_base, ssh_prefix, GIT_SUFFIX};
use crate::error::CloneError;

/// Check that `source` has the `git@<host>:<path>.git` shape.
pub fn is_ssh_url(source: &str, host: &str) -> bool {
    source.starts_with(&ssh_prefix(host)) && source.ends_with(GIT_SUFFIX)
}

/// Convert an SSH source reference into its HTTPS display URL.
///
/// `git@github.com:owner/repo.git` becomes `https://github.com/owner/repo`.
/// Pure: safe to call from every worker at once.
pub fn translate(source: &str, host: &str) -> Result<String, CloneError> {
    let invalid = || CloneError::InvalidFormat(source.to_string());

    if !is_ssh_url(source, host) {
        return Err(invalid());
    }
    // git@github.com:owner/repo.git -> owner/repo
    let prefix = ssh_prefix(host);
    let path = source
        .get(prefix.len()..source.len().saturating_sub(GIT_SUFFIX.len()))
        .unwrap_or_default();

    // Anything that would make `join` leave the host's path space
    if path.contains([':', '?', '#', '\\']) {
        return Err(invalid());
    }
    // At least owner/repo, no empty or dot segments
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 || segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return Err(invalid());
    }

    let base = https_base(host).map_err(|_| invalid())?;
    let url = base.join(path).map_err(|_| invalid())?;
    Ok(url.to_string())
}

/// Identifier shown for a source: its display URL, or the raw text when it does not translate.
pub fn display_name(source: &str, host: &str) -> String {
    translate(source, host).unwrap_or_else(|_| source.to_string())
}
