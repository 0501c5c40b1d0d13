//! Canonical installation paths.
//!
//! The installer anchors everything under `<home>/.hugo/`: downloaded
//! archives land in `temp/`, the binary and any extraction byproducts in
//! `bin/`. This module centralises that layout so callers do not duplicate
//! directory logic.

use crate::artefact::naming;
use crate::artefact::platform::Platform;
use camino::{Utf8Path, Utf8PathBuf};

/// Directory under the user home that owns the installation.
const INSTALL_DIR_NAME: &str = ".hugo";

/// The resolved directory layout for one installation.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use insthugo::artefact::platform::Platform;
/// use insthugo::paths::InstallPaths;
///
/// let paths = InstallPaths::derive(
///     Utf8Path::new("/home/user"),
///     &Platform::new("linux", "x86_64"),
/// );
/// assert_eq!(paths.executable(), "/home/user/.hugo/bin/hugo");
/// assert_eq!(paths.temp_dir(), "/home/user/.hugo/temp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    root: Utf8PathBuf,
    bin_dir: Utf8PathBuf,
    temp_dir: Utf8PathBuf,
    executable: Utf8PathBuf,
}

impl InstallPaths {
    /// Derive the layout rooted at `home` for `platform`.
    #[must_use]
    pub fn derive(home: &Utf8Path, platform: &Platform) -> Self {
        let root = home.join(INSTALL_DIR_NAME);
        let bin_dir = root.join("bin");
        let temp_dir = root.join("temp");
        let executable = bin_dir.join(naming::executable_name(platform));
        Self {
            root,
            bin_dir,
            temp_dir,
            executable,
        }
    }

    /// The installation root, `<home>/.hugo`.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Where the binary and extraction byproducts go.
    #[must_use]
    pub fn bin_dir(&self) -> &Utf8Path {
        &self.bin_dir
    }

    /// Where downloaded archives are staged.
    #[must_use]
    pub fn temp_dir(&self) -> &Utf8Path {
        &self.temp_dir
    }

    /// The final path of the installed executable.
    #[must_use]
    pub fn executable(&self) -> &Utf8Path {
        &self.executable
    }
}
