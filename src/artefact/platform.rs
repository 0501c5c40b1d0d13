//! Host platform identification in Hugo release vocabulary.
//!
//! Hugo release archives are named after Go's `GOOS`/`GOARCH` values, which
//! differ from Rust's `std::env::consts` vocabulary for some platforms. This
//! module maps the host identifiers into release vocabulary so that archive
//! names can be derived directly from a [`Platform`].

use std::env;
use std::fmt;

/// An operating system and architecture pair in release vocabulary.
///
/// The mapping is total: identifiers without a release-vocabulary
/// counterpart pass through unchanged, and resolution of an unsupported
/// platform surfaces later as a checksum registry miss rather than a panic.
///
/// # Examples
///
/// ```
/// use insthugo::artefact::platform::Platform;
///
/// let platform = Platform::new("macos", "x86_64");
/// assert_eq!(platform.os(), "darwin");
/// assert_eq!(platform.arch(), "amd64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    /// Identify the platform this process is running on.
    #[must_use]
    pub fn current() -> Self {
        Self::new(env::consts::OS, env::consts::ARCH)
    }

    /// Build a platform from host identifiers, normalising them into
    /// release vocabulary.
    #[must_use]
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: release_os(os),
            arch: release_arch(arch),
        }
    }

    /// The operating system in release vocabulary, e.g. `darwin`.
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// The architecture in release vocabulary, e.g. `amd64`.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Whether the platform is Windows, which changes the executable name
    /// and the archive format.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

/// Map a Rust OS identifier to its release-vocabulary name.
fn release_os(os: &str) -> String {
    match os {
        "macos" => "darwin",
        other => other,
    }
    .to_owned()
}

/// Map a Rust architecture identifier to its release-vocabulary name.
fn release_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        other => other,
    }
    .to_owned()
}
