//! Checksum verification for downloaded release archives.
//!
//! Computes the SHA-256 digest of a downloaded archive and compares it
//! against the expected digest in the checksum registry. Verification is
//! fail-closed: an archive whose filename has no registry entry is rejected
//! outright rather than installed unverified.

use super::registry::ChecksumRegistry;
use super::sha256_digest::Sha256Digest;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Errors arising from archive verification.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The registry holds no digest for the archive filename.
    #[error("no checksum registered for {filename}")]
    UnknownArtefact {
        /// The archive filename that was looked up.
        filename: String,
    },

    /// The computed digest differs from the registered digest.
    #[error("checksum mismatch for {filename}: expected {expected}, got {actual}")]
    DigestMismatch {
        /// The archive filename being verified.
        filename: String,
        /// The digest recorded in the registry.
        expected: Sha256Digest,
        /// The digest computed from the downloaded file.
        actual: Sha256Digest,
    },

    /// Reading the archive failed.
    #[error("verification I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compute the SHA-256 digest of the file at `path`.
///
/// Reads the file in fixed-size chunks so archives never need to fit in
/// memory.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file.
pub fn compute_sha256(path: &Path) -> Result<Sha256Digest, std::io::Error> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    let hex = format!("{:x}", hasher.finalize());
    // sha2 always produces valid 64-char lowercase hex.
    Ok(Sha256Digest::try_from(hex).expect("sha2 produces valid 64-char lowercase hex"))
}

/// Verify the archive at `path` against the digest registered for
/// `filename`.
///
/// # Errors
///
/// Returns [`VerificationError::UnknownArtefact`] if the registry has no
/// entry for `filename`, [`VerificationError::DigestMismatch`] if the
/// computed digest differs from the registered one, and
/// [`VerificationError::Io`] if the archive cannot be read.
pub fn verify_archive(
    path: &Path,
    filename: &str,
    registry: &ChecksumRegistry,
) -> Result<(), VerificationError> {
    let expected = registry
        .lookup(filename)
        .ok_or_else(|| VerificationError::UnknownArtefact {
            filename: filename.to_owned(),
        })?;
    let actual = compute_sha256(path)?;
    if actual != *expected {
        return Err(VerificationError::DigestMismatch {
            filename: filename.to_owned(),
            expected: expected.clone(),
            actual,
        });
    }
    Ok(())
}
