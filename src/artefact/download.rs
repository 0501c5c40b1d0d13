//! Release archive download over HTTP.
//!
//! Provides a trait-based abstraction for fetching release archives from
//! the GitHub release page, enabling dependency injection for testing. The
//! production downloader targets the pinned release URL; tests point it at
//! a local server instead.

use super::naming::VERSION;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// The GitHub repository owner/name for URL construction.
const GITHUB_REPO: &str = "spf13/hugo";

/// The release listing page, offered to users as a manual fallback.
pub const RELEASES_PAGE: &str = "https://github.com/spf13/hugo/releases/";

/// Network timeout for release archive downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for downloading release archives.
///
/// Abstraction allows tests to stub HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactDownloader {
    /// Download the archive `filename` into the file at `dest`.
    ///
    /// The destination file is created before the request is issued, so a
    /// failed transfer still leaves a file for cleanup to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or the file write fails.
    fn download_archive(&self, filename: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from archive download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested archive was not found (HTTP 404).
    #[error("archive not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
///
/// # Examples
///
/// ```
/// use insthugo::artefact::download::HttpDownloader;
///
/// let downloader = HttpDownloader::default();
/// assert!(downloader.url_for("hugo_0.15_linux_amd64.tar.gz").contains("spf13/hugo"));
/// ```
pub struct HttpDownloader {
    base_url: String,
}

impl HttpDownloader {
    /// Construct a downloader rooted at `base_url`.
    ///
    /// Archive URLs are formed by appending the filename to the base, so
    /// the base should end with a slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The download URL of the pinned GitHub release.
    #[must_use]
    pub fn release_base_url() -> String {
        format!("https://github.com/{GITHUB_REPO}/releases/download/v{VERSION}/")
    }

    /// The full URL the downloader will request for `filename`.
    #[must_use]
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}{filename}", self.base_url)
    }
}

impl Default for HttpDownloader {
    /// A downloader targeting the pinned GitHub release.
    fn default() -> Self {
        Self::new(Self::release_base_url())
    }
}

impl ArtefactDownloader for HttpDownloader {
    fn download_archive(&self, filename: &str, dest: &Path) -> Result<(), DownloadError> {
        let url = self.url_for(filename);
        download_to_file(&url, dest)
    }
}

/// Download a URL and write the body to a file.
fn download_to_file(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let mut file = std::fs::File::create(dest)?;
    let response = http_agent()
        .get(url)
        .call()
        .map_err(|e| map_ureq_error(url, &e))?;
    std::io::copy(&mut response.into_body().as_reader(), &mut file).map_err(DownloadError::Io)?;
    Ok(())
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
