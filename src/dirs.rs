//! Platform directory resolution.
//!
//! Wraps home directory discovery behind a trait so tests can point the
//! installer at a scratch directory instead of the real user home.

use std::path::PathBuf;

/// Trait for resolving the directories the installer anchors itself to.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// The current user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Production resolver backed by the `directories-next` crate.
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}
