//! Update checker
//!
//! Looks up the latest released version and compares it with the running
//! one. The lookup goes through the [`VersionSource`] trait; the shipped
//! implementation asks the GitHub releases API.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Duration;

/// Version of this build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release endpoint queried by default
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/Aerobit/FirefoxOptimizer/releases/latest";

/// Where the latest version identifier comes from
pub trait VersionSource {
    fn latest_version(&self) -> Result<String>;
}

/// Result of an update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    UpdateAvailable(String),
    CheckFailed(String),
}

/// Compare the remote version with `local`
///
/// Never fails: lookup problems are reported as [`UpdateStatus::CheckFailed`].
///
/// ```rust
/// use ffopt::{check_for_update, Result, UpdateStatus, VersionSource};
///
/// struct Fixed(&'static str);
///
/// impl VersionSource for Fixed {
///     fn latest_version(&self) -> Result<String> {
///         Ok(self.0.to_string())
///     }
/// }
///
/// assert_eq!(
///     check_for_update(&Fixed("2.1"), "2.0"),
///     UpdateStatus::UpdateAvailable("2.1".to_string())
/// );
/// ```
pub fn check_for_update(source: &dyn VersionSource, local: &str) -> UpdateStatus {
    let remote = match source.latest_version() {
        Ok(v) => normalize(&v).to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "update check failed");
            return UpdateStatus::CheckFailed(e.to_string());
        }
    };

    if remote.is_empty() {
        return UpdateStatus::CheckFailed("remote version is empty".to_string());
    }

    tracing::debug!(%remote, local, "comparing versions");
    if is_newer(&remote, normalize(local)) {
        UpdateStatus::UpdateAvailable(remote)
    } else {
        UpdateStatus::UpToDate
    }
}

/// Strip surrounding whitespace and a leading `v` from a tag
fn normalize(version: &str) -> &str {
    let version = version.trim();
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// `remote > local` by numeric dotted components; plain inequality otherwise
fn is_newer(remote: &str, local: &str) -> bool {
    match (numeric_parts(remote), numeric_parts(local)) {
        (Some(r), Some(l)) => {
            let len = r.len().max(l.len());
            let at = |v: &[u64], i: usize| v.get(i).copied().unwrap_or(0);
            (0..len)
                .map(|i| at(&r, i).cmp(&at(&l, i)))
                .find(|o| *o != Ordering::Equal)
                == Some(Ordering::Greater)
        }
        _ => remote != local,
    }
}

fn numeric_parts(version: &str) -> Option<Vec<u64>> {
    version.split('.').map(|p| p.parse().ok()).collect()
}

/// Latest release of ffopt on GitHub
pub struct GithubReleases {
    url: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct Release {
    tag_name: String,
}

impl GithubReleases {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GithubReleases {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASES_URL)
    }
}

impl VersionSource for GithubReleases {
    fn latest_version(&self) -> Result<String> {
        let failed = |e: reqwest::Error| Error::CheckFailed(e.to_string());

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("ffopt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(failed)?;

        tracing::debug!(url = %self.url, "fetching latest release");
        let response = client.get(&self.url).send().map_err(failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CheckFailed(format!("HTTP status {}", status)));
        }

        let release: Release = response.json().map_err(failed)?;
        Ok(release.tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    struct Stub(std::result::Result<&'static str, &'static str>);

    impl VersionSource for Stub {
        fn latest_version(&self) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|e| Error::CheckFailed(e.to_string()))
        }
    }

    #[test]
    fn test_update_available() {
        assert_eq!(
            check_for_update(&Stub(Ok("2.1")), "2.0"),
            UpdateStatus::UpdateAvailable("2.1".to_string())
        );
    }

    #[test]
    fn test_equal_versions() {
        assert_eq!(check_for_update(&Stub(Ok("2.0")), "2.0"), UpdateStatus::UpToDate);
        assert_eq!(check_for_update(&Stub(Ok("v1.0")), "1.0.0"), UpdateStatus::UpToDate);
    }

    #[test]
    fn test_local_newer_is_up_to_date() {
        assert_eq!(check_for_update(&Stub(Ok("1.9")), "1.10"), UpdateStatus::UpToDate);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(
            check_for_update(&Stub(Ok("1.10")), "1.9"),
            UpdateStatus::UpdateAvailable("1.10".to_string())
        );
    }

    #[test]
    fn test_non_numeric_falls_back_to_inequality() {
        assert_eq!(
            check_for_update(&Stub(Ok("2.0-beta")), "1.0"),
            UpdateStatus::UpdateAvailable("2.0-beta".to_string())
        );
        assert_eq!(
            check_for_update(&Stub(Ok("2.0-beta")), "2.0-beta"),
            UpdateStatus::UpToDate
        );
    }

    #[test]
    fn test_network_failure() {
        let status = check_for_update(&Stub(Err("connection refused")), "1.0");
        assert!(matches!(status, UpdateStatus::CheckFailed(ref m) if m.contains("connection refused")));
    }

    #[test]
    fn test_empty_remote() {
        assert!(matches!(
            check_for_update(&Stub(Ok("  ")), "1.0"),
            UpdateStatus::CheckFailed(_)
        ));
    }

    /// Answer a single HTTP request with `status` and `body`, return its URL
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/releases/latest", addr)
    }

    fn releases(url: String) -> GithubReleases {
        GithubReleases::new(url).with_timeout(Duration::from_secs(5))
    }

    #[test]
    fn test_github_releases_reads_tag_name() {
        let url = serve_once("200 OK", r#"{"tag_name":"v2.1","name":"Release 2.1"}"#);
        assert_eq!(releases(url).latest_version().unwrap(), "v2.1");
    }

    #[test]
    fn test_github_releases_http_error_status() {
        let url = serve_once("404 Not Found", r#"{"message":"Not Found"}"#);
        let err = releases(url).latest_version().unwrap_err();
        assert!(matches!(err, Error::CheckFailed(ref m) if m.contains("404")));
    }

    #[test]
    fn test_github_releases_missing_tag_name() {
        let url = serve_once("200 OK", r#"{"name":"Release 2.1"}"#);
        let err = releases(url).latest_version().unwrap_err();
        assert!(matches!(err, Error::CheckFailed(_)));
    }

    #[test]
    fn test_github_releases_check_reports_failure() {
        let url = serve_once("500 Internal Server Error", "");
        assert!(matches!(
            check_for_update(&releases(url), "1.0"),
            UpdateStatus::CheckFailed(_)
        ));
    }
}
