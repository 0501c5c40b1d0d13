//! Archive extraction for release artefacts.
//!
//! Extracts `.zip` archives and gzip-compressed single files to a target
//! directory with path traversal protection. Zip entries keep their
//! directory structure and Unix permission bits; gzip archives are written
//! under the filename recorded in the gzip header.

use super::naming::ArchiveFormat;
use std::path::{Component, Path, PathBuf};

/// Trait for extracting release archives.
///
/// Each supported [`ArchiveFormat`] has one implementation; callers obtain
/// it through [`extractor_for`].
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the paths of the files that were written, in archive order.
    /// Directories are created as needed but not reported.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry attempts to
    /// escape the destination directory, [`ExtractionError::EmptyArchive`]
    /// if the archive holds no files, and [`ExtractionError::Io`] on I/O
    /// failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path)
    -> Result<Vec<PathBuf>, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip archive is malformed.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The gzip header does not carry a usable embedded filename.
    #[error("no usable filename in gzip header of {archive}: {reason}")]
    MissingFilename {
        /// The archive that was being extracted.
        archive: String,
        /// Description of what made the name unusable.
        reason: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Select the extractor for an archive format.
#[must_use]
pub fn extractor_for(format: ArchiveFormat) -> &'static dyn ArchiveExtractor {
    match format {
        ArchiveFormat::Zip => &ZipExtractor,
        ArchiveFormat::Gzip => &GzipExtractor,
    }
}

/// Extractor for `.zip` archives using the `zip` crate.
///
/// Entry paths are sanitised through the archive reader before any file is
/// written, guarding against zip-slip attacks. Unix permission bits stored
/// in the archive are restored so executables stay executable.
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        let file = std::fs::File::open(archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut written = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let Some(entry_path) = entry.enclosed_name() else {
                return Err(ExtractionError::PathTraversal {
                    path: entry.name().to_owned(),
                });
            };
            let dest_path = dest_dir.join(entry_path);

            if entry.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
            } else {
                if let Some(parent) = dest_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut out = std::fs::File::create(&dest_path)?;
                std::io::copy(&mut entry, &mut out)?;
                written.push(dest_path.clone());
            }

            apply_unix_mode(&dest_path, entry.unix_mode())?;
        }

        if written.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        Ok(written)
    }
}

/// Extractor for gzip-compressed single files using the `flate2` crate.
///
/// The output filename comes from the original-name field of the gzip
/// header, matching how the release archives were produced. An archive
/// without a usable embedded name is rejected rather than guessed at.
pub struct GzipExtractor;

impl ArchiveExtractor for GzipExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        let file = std::fs::File::open(archive_path)?;
        let mut decoder = flate2::read::GzDecoder::new(file);

        let name_bytes = decoder
            .header()
            .and_then(|header| header.filename())
            .ok_or_else(|| missing_filename(archive_path, "header has no original-name field"))?
            .to_vec();
        let name = String::from_utf8(name_bytes)
            .map_err(|_| missing_filename(archive_path, "embedded filename is not valid UTF-8"))?;
        if name.is_empty() {
            return Err(missing_filename(archive_path, "embedded filename is empty"));
        }

        let entry_path = PathBuf::from(&name);
        validate_entry_path(&entry_path)?;

        let dest_path = dest_dir.join(&entry_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&dest_path)?;
        std::io::copy(&mut decoder, &mut out)?;

        Ok(vec![dest_path])
    }
}

fn missing_filename(archive_path: &Path, reason: &str) -> ExtractionError {
    ExtractionError::MissingFilename {
        archive: archive_path.display().to_string(),
        reason: reason.to_owned(),
    }
}

/// Validate that an entry path cannot escape the destination directory
/// via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    if path.is_absolute() {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(ExtractionError::PathTraversal {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Restore the Unix permission bits recorded for an archive entry.
#[cfg(unix)]
fn apply_unix_mode(path: &Path, mode: Option<u32>) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_unix_mode(_path: &Path, _mode: Option<u32>) -> std::io::Result<()> {
    Ok(())
}
