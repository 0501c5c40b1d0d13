//! User-facing messages for the install pipeline.
//!
//! Progress is reported on standard error so the installed binary path and
//! any tool output stay clean. Message construction lives here so the
//! pipeline and the behaviour tests agree on exact wording.

use crate::artefact::download::RELEASES_PAGE;
use camino::Utf8Path;
use std::io::Write;

/// Write one line to the progress stream.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress; ignore write failures.
    }
}

/// Announce that no installed binary was found under `root`.
#[must_use]
pub fn missing_message(root: &Utf8Path) -> String {
    format!("Unable to find Hugo in {root}; installing it now.")
}

/// Announce the archive about to be downloaded.
#[must_use]
pub fn downloading_message(filename: &str) -> String {
    format!("Downloading {filename} from GitHub releases...")
}

/// Report a finished installation.
#[must_use]
pub fn installed_message(executable: &Utf8Path) -> String {
    format!("Hugo installed at {executable}")
}

/// Report that the binary was already in place.
#[must_use]
pub fn already_installed_message(executable: &Utf8Path) -> String {
    format!("Hugo is already installed at {executable}")
}

/// Manual fallback instructions for when the download keeps failing.
#[must_use]
pub fn manual_download_hint(executable: &Utf8Path) -> String {
    format!(
        "If the problem persists, download Hugo yourself from {RELEASES_PAGE} \
         and place the executable at {executable}."
    )
}
