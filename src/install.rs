//! Install pipeline orchestration.
//!
//! Drives the whole bootstrap: resolve the release archive for the host
//! platform, download it into the temp directory, verify its SHA-256
//! digest against the checksum registry, extract the binary, and move it
//! to its final path. Every intermediate file is tracked in a
//! [`TempFileSet`] scoped to the invocation, and cleanup runs on the
//! success and failure paths alike.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::artefact::download::{ArtefactDownloader, HttpDownloader};
use crate::artefact::extraction::extractor_for;
use crate::artefact::naming::ArtefactName;
use crate::artefact::platform::Platform;
use crate::artefact::registry::ChecksumRegistry;
use crate::artefact::verification::verify_archive;
use crate::dirs::{BaseDirs, SystemBaseDirs};
use crate::error::{InstallError, Result};
use crate::output::{self, write_stderr_line};
use crate::paths::InstallPaths;
use crate::temp::TempFileSet;

/// Configuration for one install invocation.
#[derive(Debug)]
pub struct InstallConfig<'a> {
    /// Checksum registry consulted before extraction.
    pub registry: &'a ChecksumRegistry,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// Terminal states of a successful install invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The executable was already present; nothing was downloaded.
    AlreadyInstalled {
        /// The pre-existing executable path.
        executable: Utf8PathBuf,
    },
    /// The executable was downloaded, verified, and installed.
    Installed {
        /// The freshly installed executable path.
        executable: Utf8PathBuf,
    },
}

impl InstallOutcome {
    /// The executable path for either outcome.
    #[must_use]
    pub fn executable(&self) -> &Utf8Path {
        match self {
            Self::AlreadyInstalled { executable } | Self::Installed { executable } => executable,
        }
    }
}

/// Install the binary for the current platform using production
/// directory resolution and HTTP download.
///
/// # Errors
///
/// Returns an [`InstallError`] naming the pipeline stage that failed.
pub fn install(config: &InstallConfig<'_>, stderr: &mut dyn Write) -> Result<InstallOutcome> {
    install_with(
        config,
        &Platform::current(),
        &SystemBaseDirs,
        &HttpDownloader::default(),
        stderr,
    )
}

/// Testable inner function with injected dependencies.
///
/// The production entry point [`install`] delegates here with real
/// implementations; tests inject a scratch home directory and a stub or
/// local-server downloader.
///
/// # Errors
///
/// Returns an [`InstallError`] naming the pipeline stage that failed.
pub fn install_with(
    config: &InstallConfig<'_>,
    platform: &Platform,
    dirs: &dyn BaseDirs,
    downloader: &dyn ArtefactDownloader,
    stderr: &mut dyn Write,
) -> Result<InstallOutcome> {
    // Step 1: Resolve the installation root.
    let home = resolve_home(dirs)?;

    // Step 2: Derive paths and the artefact name.
    let paths = InstallPaths::derive(&home, platform);
    let artefact = ArtefactName::resolve(platform);

    // Step 3: Short-circuit when the binary is already in place.
    if paths.executable().exists() {
        if !config.quiet {
            write_stderr_line(stderr, output::already_installed_message(paths.executable()));
        }
        return Ok(InstallOutcome::AlreadyInstalled {
            executable: paths.executable().to_owned(),
        });
    }

    if !config.quiet {
        write_stderr_line(stderr, output::missing_message(paths.root()));
    }

    // Step 4: Prepare the directory layout.
    prepare_directories(&paths)?;

    // Steps 5-8 run with cleanup guaranteed afterwards on both paths.
    let mut temp = TempFileSet::new();
    let result = run_pipeline(config, &artefact, &paths, downloader, &mut temp, stderr);

    // Step 9: Remove temporary files regardless of the pipeline result.
    if !config.quiet {
        write_stderr_line(stderr, "Removing temporary files...");
    }
    temp.remove_all();

    result
}

/// The core pipeline: download, verify, extract, finalize.
fn run_pipeline(
    config: &InstallConfig<'_>,
    artefact: &ArtefactName,
    paths: &InstallPaths,
    downloader: &dyn ArtefactDownloader,
    temp: &mut TempFileSet,
    stderr: &mut dyn Write,
) -> Result<InstallOutcome> {
    // Step 5: Download the archive into the temp directory. The archive
    // path is registered before the request so a failed transfer still
    // leaves the partial file in the cleanup set.
    let archive_path = paths.temp_dir().join(artefact.filename());
    temp.register(archive_path.as_std_path());

    if !config.quiet {
        write_stderr_line(stderr, output::downloading_message(artefact.filename()));
    }
    downloader
        .download_archive(artefact.filename(), archive_path.as_std_path())
        .map_err(|source| InstallError::Network {
            hint: output::manual_download_hint(paths.executable()),
            source,
        })?;

    // Step 6: Verify the digest before touching the archive contents.
    if !config.quiet {
        write_stderr_line(stderr, "Verifying SHA-256 checksum...");
    }
    verify_archive(
        archive_path.as_std_path(),
        artefact.filename(),
        config.registry,
    )?;

    // Step 7: Extract into the binary directory and track byproducts.
    if !config.quiet {
        write_stderr_line(stderr, "Extracting archive...");
    }
    let written = extractor_for(artefact.format())
        .extract(archive_path.as_std_path(), paths.bin_dir().as_std_path())?;

    let extracted_binary = paths.bin_dir().join(artefact.binary_name());
    register_byproducts(written, extracted_binary.as_std_path(), temp);

    // Step 8: Move the binary to its final path and make it executable.
    finalize(&extracted_binary, paths.executable())?;

    if !config.quiet {
        write_stderr_line(stderr, output::installed_message(paths.executable()));
    }
    Ok(InstallOutcome::Installed {
        executable: paths.executable().to_owned(),
    })
}

/// Determine the user's home directory as a UTF-8 path.
fn resolve_home(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    let home = dirs.home_dir().ok_or_else(|| InstallError::Environment {
        reason: "no home directory for the current user".to_owned(),
    })?;
    Utf8PathBuf::from_path_buf(home).map_err(|path| InstallError::Environment {
        reason: format!("home directory is not valid UTF-8: {}", path.display()),
    })
}

/// Create the root, binary, and temp directories, tolerating ones that
/// already exist.
fn prepare_directories(paths: &InstallPaths) -> Result<()> {
    for dir in [paths.root(), paths.bin_dir(), paths.temp_dir()] {
        std::fs::create_dir_all(dir.as_std_path()).map_err(|source| InstallError::Directory {
            path: dir.to_owned(),
            source,
        })?;
    }
    Ok(())
}

/// Track every extracted file except the binary itself for removal.
///
/// Release archives bundle ancillary files (license and readme) next to
/// the binary; those are byproducts, not the artefact being installed.
fn register_byproducts(written: Vec<PathBuf>, expected_binary: &Path, temp: &mut TempFileSet) {
    for path in written {
        if path != expected_binary {
            temp.register(path);
        }
    }
}

/// Move the extracted binary to its final path and set its execute bits.
fn finalize(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    let map_err = |source| InstallError::Finalize {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    };
    std::fs::rename(from.as_std_path(), to.as_std_path()).map_err(map_err)?;
    make_executable(to.as_std_path()).map_err(map_err)
}

/// Ensure the installed binary carries execute permission.
///
/// The zip extractor restores recorded modes, but gzip archives carry no
/// mode at all, so the bit is enforced here for both formats.
#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
