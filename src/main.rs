//! Hugo bootstrap installer entrypoint.
//!
//! This binary fetches the pinned Hugo release for the host platform,
//! verifies it, and installs the executable under `<home>/.hugo/bin`,
//! reporting progress on standard error.

use insthugo::artefact::registry::ChecksumRegistry;
use insthugo::error::Result;
use insthugo::install::{InstallConfig, InstallOutcome, install};
use insthugo::output::write_stderr_line;
use std::io::Write;

fn main() {
    let mut stderr = std::io::stderr();
    let run_result = run(&mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(stderr: &mut dyn Write) -> Result<InstallOutcome> {
    let registry = ChecksumRegistry::builtin()?;
    let config = InstallConfig {
        registry: &registry,
        quiet: false,
    };
    install(&config, stderr)
}

fn exit_code_for_run_result(result: Result<InstallOutcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
