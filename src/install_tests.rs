//! Unit tests for the install pipeline.

use super::*;
use crate::artefact::download::{DownloadError, MockArtefactDownloader};
use crate::artefact::sha256_digest::Sha256Digest;
use crate::artefact::verification::VerificationError;
use crate::dirs::MockBaseDirs;
use rstest::{fixture, rstest};
use sha2::{Digest, Sha256};

const PAYLOAD: &[u8] = b"#!/bin/sh\necho hugo v0.15\n";

#[fixture]
fn home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp home")
}

fn fixed_dirs(home: &tempfile::TempDir) -> MockBaseDirs {
    let path = home.path().to_path_buf();
    let mut dirs = MockBaseDirs::new();
    dirs.expect_home_dir().returning(move || Some(path.clone()));
    dirs
}

fn home_paths(home: &tempfile::TempDir, platform: &Platform) -> InstallPaths {
    let home = Utf8Path::from_path(home.path()).expect("UTF-8 temp dir");
    InstallPaths::derive(home, platform)
}

fn digest_of(bytes: &[u8]) -> Sha256Digest {
    let hex = format!("{:x}", Sha256::digest(bytes));
    Sha256Digest::try_from(hex).expect("sha2 digest is valid")
}

fn registry_for(filename: &str, archive: &[u8]) -> ChecksumRegistry {
    ChecksumRegistry::from_entries([(filename.to_owned(), digest_of(archive))])
}

fn gzip_archive(embedded_name: &str, payload: &[u8]) -> Vec<u8> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut encoder = flate2::GzBuilder::new()
        .filename(embedded_name)
        .write(cursor, flate2::Compression::default());
    encoder.write_all(payload).expect("write payload");
    encoder.finish().expect("finish gzip").into_inner()
}

fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (name, payload) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(payload).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Downloader that writes fixed bytes wherever it is pointed.
struct FixtureDownloader {
    bytes: Vec<u8>,
}

impl ArtefactDownloader for FixtureDownloader {
    // Spelt in full: the glob import above shadows the prelude `Result`
    // with the crate-wide single-parameter alias.
    fn download_archive(
        &self,
        _filename: &str,
        dest: &Path,
    ) -> std::result::Result<(), DownloadError> {
        std::fs::write(dest, &self.bytes).map_err(DownloadError::Io)
    }
}

/// Downloader whose requests always fail.
struct FailingDownloader;

impl ArtefactDownloader for FailingDownloader {
    fn download_archive(
        &self,
        filename: &str,
        _dest: &Path,
    ) -> std::result::Result<(), DownloadError> {
        Err(DownloadError::HttpError {
            url: format!("https://example.test/{filename}"),
            reason: "connection reset by peer".to_owned(),
        })
    }
}

fn quiet_config(registry: &ChecksumRegistry) -> InstallConfig<'_> {
    InstallConfig {
        registry,
        quiet: true,
    }
}

fn temp_dir_entries(paths: &InstallPaths) -> usize {
    std::fs::read_dir(paths.temp_dir().as_std_path())
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[rstest]
fn gzip_pipeline_installs_the_binary(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &archive);
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    let outcome = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("pipeline succeeds");

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            executable: paths.executable().to_owned()
        }
    );
    let installed = std::fs::read(paths.executable().as_std_path()).expect("binary installed");
    assert_eq!(installed, PAYLOAD);
    assert_eq!(temp_dir_entries(&paths), 0, "temp directory not emptied");
}

#[cfg(unix)]
#[rstest]
fn installed_binary_is_executable(home: tempfile::TempDir) {
    use std::os::unix::fs::PermissionsExt;

    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &archive);
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("pipeline succeeds");

    let mode = std::fs::metadata(paths.executable().as_std_path())
        .expect("binary installed")
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111, "execute bits missing");
}

#[rstest]
fn zip_pipeline_removes_extraction_byproducts(home: tempfile::TempDir) {
    let platform = Platform::new("macos", "x86_64");
    let paths = home_paths(&home, &platform);
    let archive = zip_archive(&[
        ("hugo_0.15_darwin_amd64", PAYLOAD),
        ("README.md", b"readme".as_slice()),
        ("LICENSE.md", b"license".as_slice()),
    ]);
    let registry = registry_for("hugo_0.15_darwin_amd64.zip", &archive);
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    let outcome = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("pipeline succeeds");

    assert_eq!(outcome.executable(), paths.executable());
    assert!(paths.executable().exists());
    assert!(!paths.bin_dir().join("README.md").exists());
    assert!(!paths.bin_dir().join("LICENSE.md").exists());
    assert_eq!(temp_dir_entries(&paths), 0, "temp directory not emptied");
}

#[rstest]
fn existing_binary_short_circuits_without_network(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    std::fs::create_dir_all(paths.bin_dir().as_std_path()).expect("create bin dir");
    std::fs::write(paths.executable().as_std_path(), b"existing").expect("preinstall binary");

    let registry = ChecksumRegistry::default();
    // An expectation-free mock panics on any call, proving no download.
    let downloader = MockArtefactDownloader::new();

    let mut stderr = Vec::new();
    let outcome = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("short-circuit succeeds");

    assert_eq!(
        outcome,
        InstallOutcome::AlreadyInstalled {
            executable: paths.executable().to_owned()
        }
    );
    let untouched = std::fs::read(paths.executable().as_std_path()).expect("binary kept");
    assert_eq!(untouched, b"existing");
}

#[rstest]
fn missing_home_is_an_environment_error() {
    let mut dirs = MockBaseDirs::new();
    dirs.expect_home_dir().returning(|| None);

    let registry = ChecksumRegistry::default();
    let downloader = MockArtefactDownloader::new();

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &Platform::new("linux", "x86_64"),
        &dirs,
        &downloader,
        &mut stderr,
    )
    .expect_err("no home directory");

    assert!(matches!(error, InstallError::Environment { .. }));
}

#[rstest]
fn checksum_mismatch_aborts_before_extraction(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", b"different bytes entirely");
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect_err("digest mismatch");

    assert!(matches!(
        error,
        InstallError::Verification(VerificationError::DigestMismatch { .. })
    ));
    assert!(!paths.executable().exists());
    assert_eq!(temp_dir_entries(&paths), 0, "archive not cleaned up");
}

#[rstest]
fn unverifiable_artefact_fails_closed(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let downloader = FixtureDownloader { bytes: archive };
    let registry = ChecksumRegistry::default();

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect_err("no registry entry");

    assert!(matches!(
        error,
        InstallError::Verification(VerificationError::UnknownArtefact { .. })
    ));
}

#[rstest]
fn download_failure_carries_the_manual_hint(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    let registry = ChecksumRegistry::default();

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &FailingDownloader,
        &mut stderr,
    )
    .expect_err("download fails");

    let InstallError::Network { hint, .. } = &error else {
        panic!("expected a network error, got {error:?}");
    };
    assert!(hint.contains(paths.executable().as_str()));
    assert_eq!(temp_dir_entries(&paths), 0, "partial download not cleaned up");
}

#[rstest]
fn corrupt_archive_fails_extraction_and_cleans_up(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let paths = home_paths(&home, &platform);
    let garbage = b"not a gzip stream at all".to_vec();
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &garbage);
    let downloader = FixtureDownloader { bytes: garbage };

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect_err("extraction fails");

    assert!(matches!(error, InstallError::Extraction(_)));
    assert!(!paths.executable().exists());
    assert_eq!(temp_dir_entries(&paths), 0, "archive not cleaned up");
}

#[rstest]
fn misnamed_archive_binary_fails_finalize_and_cleans_up(home: tempfile::TempDir) {
    let platform = Platform::new("macos", "x86_64");
    let paths = home_paths(&home, &platform);
    // The entry is already called `hugo`, so the qualified name the rename
    // starts from never exists.
    let archive = zip_archive(&[("hugo", PAYLOAD), ("README.md", b"readme".as_slice())]);
    let registry = registry_for("hugo_0.15_darwin_amd64.zip", &archive);
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    let error = install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect_err("rename source is missing");

    assert!(matches!(error, InstallError::Finalize { .. }));
    assert!(
        !paths.executable().exists(),
        "stray entry left at the executable path"
    );
    assert!(!paths.bin_dir().join("README.md").exists());
    assert_eq!(temp_dir_entries(&paths), 0, "archive not cleaned up");
}

#[rstest]
fn progress_messages_follow_the_pipeline(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &archive);
    let downloader = FixtureDownloader { bytes: archive };
    let config = InstallConfig {
        registry: &registry,
        quiet: false,
    };

    let mut stderr = Vec::new();
    install_with(
        &config,
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("pipeline succeeds");

    let progress = String::from_utf8(stderr).expect("progress is UTF-8");
    assert!(progress.contains("Unable to find Hugo"));
    assert!(progress.contains("Downloading hugo_0.15_linux_amd64.tar.gz"));
    assert!(progress.contains("Verifying SHA-256 checksum..."));
    assert!(progress.contains("Extracting archive..."));
    assert!(progress.contains("Removing temporary files..."));
    assert!(progress.contains("Hugo installed at"));
}

#[rstest]
fn quiet_mode_suppresses_progress(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &archive);
    let downloader = FixtureDownloader { bytes: archive };

    let mut stderr = Vec::new();
    install_with(
        &quiet_config(&registry),
        &platform,
        &fixed_dirs(&home),
        &downloader,
        &mut stderr,
    )
    .expect("pipeline succeeds");

    assert!(stderr.is_empty(), "quiet run wrote progress output");
}

#[rstest]
fn repeated_installs_return_the_same_path(home: tempfile::TempDir) {
    let platform = Platform::new("linux", "x86_64");
    let archive = gzip_archive("hugo_0.15_linux_amd64", PAYLOAD);
    let registry = registry_for("hugo_0.15_linux_amd64.tar.gz", &archive);
    let downloader = FixtureDownloader { bytes: archive };
    let dirs = fixed_dirs(&home);

    let mut stderr = Vec::new();
    let first = install_with(
        &quiet_config(&registry),
        &platform,
        &dirs,
        &downloader,
        &mut stderr,
    )
    .expect("first install succeeds");

    // The second run must not download; an expectation-free mock enforces it.
    let second = install_with(
        &quiet_config(&registry),
        &platform,
        &dirs,
        &MockArtefactDownloader::new(),
        &mut stderr,
    )
    .expect("second install short-circuits");

    assert_eq!(first.executable(), second.executable());
    assert!(matches!(second, InstallOutcome::AlreadyInstalled { .. }));
}
