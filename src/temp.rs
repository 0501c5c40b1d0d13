//! Temporary file tracking for a single install attempt.
//!
//! Every file the pipeline creates on the way to the final binary is
//! registered here: the downloaded archive before the request is issued,
//! and extraction byproducts as they appear. Cleanup runs on both the
//! success and failure paths, with a `Drop` backstop for unwinding.

use std::path::PathBuf;

/// An ordered set of files to delete when the install attempt ends.
///
/// Removal is best-effort: files that no longer exist are skipped, and
/// other removal failures are logged without masking the pipeline result.
///
/// # Examples
///
/// ```
/// use insthugo::temp::TempFileSet;
///
/// let mut set = TempFileSet::new();
/// set.register("staging/archive.zip");
/// set.register("staging/archive.zip");
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TempFileSet {
    paths: Vec<PathBuf>,
}

impl TempFileSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` to the set, ignoring duplicates.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// The number of files currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set tracks no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every tracked file and empty the set.
    pub fn remove_all(&mut self) {
        for path in self.paths.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    log::warn!("could not remove temporary file {}: {err}", path.display());
                }
            }
        }
    }
}

impl Drop for TempFileSet {
    /// Backstop for unwinding; the pipeline calls [`TempFileSet::remove_all`]
    /// explicitly on both result paths.
    fn drop(&mut self) {
        if !self.paths.is_empty() {
            self.remove_all();
        }
    }
}
