//! Error types for the install pipeline.
//!
//! Each variant maps to one stage of the pipeline, so a failure identifies
//! where installation stopped. Network failures carry manual-download
//! instructions, since a flaky connection is the one problem users can
//! route around themselves.

use crate::artefact::download::DownloadError;
use crate::artefact::extraction::ExtractionError;
use crate::artefact::registry::RegistryError;
use crate::artefact::verification::VerificationError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during the installation pipeline.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The environment does not provide a usable home directory.
    #[error("could not determine the installation root: {reason}")]
    Environment {
        /// Description of what was missing or malformed.
        reason: String,
    },

    /// Creating one of the installation directories failed.
    #[error("could not create {path}: {source}")]
    Directory {
        /// The directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Downloading the release archive failed.
    #[error("{source}\n{hint}")]
    Network {
        /// Manual fallback instructions for the user.
        hint: String,
        /// The underlying download error.
        #[source]
        source: DownloadError,
    },

    /// The downloaded archive failed checksum verification.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// Unpacking the verified archive failed.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Moving the extracted binary into its final location failed.
    #[error("could not install {to} (from {from}): {source}")]
    Finalize {
        /// The extracted binary that was being moved.
        from: Utf8PathBuf,
        /// The final executable path.
        to: Utf8PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The checksum registry could not be loaded.
    #[error("checksum registry unusable: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type alias using [`InstallError`].
pub type Result<T> = std::result::Result<T, InstallError>;
