//! Release archive naming policy.
//!
//! Derives the archive filename published on the GitHub release page for a
//! given [`Platform`], together with the archive format and the name of the
//! binary found inside the archive. Naming is pure: resolution performs no
//! I/O and never fails, so an unsupported platform produces a well-formed
//! name that simply has no checksum registry entry.

use super::platform::Platform;
use std::fmt;

/// The tool being installed.
pub(crate) const TOOL: &str = "hugo";

/// The pinned Hugo release version.
pub const VERSION: &str = "0.15";

/// Archive formats used by the Hugo release artefacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// A zip archive, used for Darwin and Windows builds.
    Zip,
    /// A gzip-compressed single file, used for every other platform.
    Gzip,
}

impl ArchiveFormat {
    /// The filename extension for this format, including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::Gzip => ".tar.gz",
        }
    }
}

/// The name of the installed executable for `platform`.
///
/// Windows binaries carry an `.exe` suffix; every other platform installs
/// a bare `hugo`.
#[must_use]
pub fn executable_name(platform: &Platform) -> String {
    if platform.is_windows() {
        format!("{TOOL}.exe")
    } else {
        TOOL.to_owned()
    }
}

/// A resolved release archive name for one platform.
///
/// # Examples
///
/// ```
/// use insthugo::artefact::naming::{ArchiveFormat, ArtefactName};
/// use insthugo::artefact::platform::Platform;
///
/// let artefact = ArtefactName::resolve(&Platform::new("linux", "x86_64"));
/// assert_eq!(artefact.filename(), "hugo_0.15_linux_amd64.tar.gz");
/// assert_eq!(artefact.format(), ArchiveFormat::Gzip);
/// assert_eq!(artefact.binary_name(), "hugo_0.15_linux_amd64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    filename: String,
    format: ArchiveFormat,
    binary_name: String,
}

impl ArtefactName {
    /// Resolve the archive name for `platform`.
    ///
    /// Darwin and Windows releases ship as zip archives; the 32-bit Windows
    /// build additionally carries a `_32-bit-only` qualifier. All remaining
    /// platforms ship as gzip-compressed single files named `.tar.gz` on the
    /// release page.
    #[must_use]
    pub fn resolve(platform: &Platform) -> Self {
        let base = format!("{TOOL}_{VERSION}_{platform}");
        match platform.os() {
            "darwin" => Self {
                filename: format!("{base}{}", ArchiveFormat::Zip.extension()),
                format: ArchiveFormat::Zip,
                binary_name: base,
            },
            "windows" => {
                let qualified = if platform.arch() == "386" {
                    format!("{base}_32-bit-only")
                } else {
                    base
                };
                Self {
                    filename: format!("{qualified}{}", ArchiveFormat::Zip.extension()),
                    format: ArchiveFormat::Zip,
                    binary_name: format!("{qualified}.exe"),
                }
            }
            _ => Self {
                filename: format!("{base}{}", ArchiveFormat::Gzip.extension()),
                format: ArchiveFormat::Gzip,
                binary_name: base,
            },
        }
    }

    /// The archive filename as published on the release page.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The archive format, which selects the extractor.
    #[must_use]
    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// The name of the binary inside the archive once extracted.
    ///
    /// This is the filename with the archive extension stripped, or with
    /// `.exe` substituted on Windows.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)
    }
}
