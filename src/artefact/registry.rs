//! Checksum registry for release archives.
//!
//! Maps archive filenames to their expected SHA-256 digests. The built-in
//! registry for the pinned Hugo release is embedded at compile time from
//! `checksums.toml`; callers may also supply their own registry, which the
//! install pipeline accepts by reference. Digest validation runs during
//! deserialization, so a malformed registry is rejected at parse time.

use super::sha256_digest::Sha256Digest;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The embedded checksum table for the pinned release.
const BUILTIN_CHECKSUMS: &str = include_str!("checksums.toml");

/// Errors arising from loading a checksum registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// TOML deserialization or digest validation failed.
    #[error("checksum registry parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk shape of a checksum registry document.
#[derive(Debug, Deserialize)]
struct RegistryDocument {
    /// Archive filename to digest mapping.
    artefacts: BTreeMap<String, Sha256Digest>,
}

/// A set of expected digests keyed by archive filename.
///
/// # Examples
///
/// ```
/// use insthugo::artefact::registry::ChecksumRegistry;
///
/// let registry = ChecksumRegistry::builtin().expect("embedded registry is valid");
/// assert!(registry.lookup("hugo_0.15_linux_amd64.tar.gz").is_some());
/// assert!(registry.lookup("hugo_9.99_linux_amd64.tar.gz").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChecksumRegistry {
    entries: BTreeMap<String, Sha256Digest>,
}

impl ChecksumRegistry {
    /// Load the embedded registry for the pinned release.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if the embedded document is
    /// malformed. The document ships inside the binary, so this only
    /// fails on a broken build.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml(BUILTIN_CHECKSUMS)
    }

    /// Parse a registry from a TOML document with an `[artefacts]` table.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if the document is not valid TOML
    /// or any digest fails validation.
    pub fn from_toml(document: &str) -> Result<Self, RegistryError> {
        let document: RegistryDocument = toml::from_str(document)?;
        Ok(Self {
            entries: document.artefacts,
        })
    }

    /// Build a registry from filename and digest pairs.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Sha256Digest)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up the expected digest for an archive filename.
    #[must_use]
    pub fn lookup(&self, filename: &str) -> Option<&Sha256Digest> {
        self.entries.get(filename)
    }

    /// The number of registered archives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
