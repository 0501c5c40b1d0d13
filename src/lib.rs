//! Hugo bootstrap installer library.
//!
//! This crate downloads the pinned Hugo release archive for the host
//! platform, verifies its SHA-256 digest against a built-in checksum
//! registry, extracts the binary, and installs it under `<home>/.hugo/bin`.
//! It backs the `insthugo` binary and can be driven programmatically with
//! injected directories, downloaders, and registries.
//!
//! # Modules
//!
//! - [`artefact`] - Release archive naming, download, verification, and extraction
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types for each pipeline stage
//! - [`install`] - Install pipeline orchestration
//! - [`output`] - Progress and fallback message formatting
//! - [`paths`] - Canonical installation path layout
//! - [`temp`] - Temporary file tracking scoped to one invocation

pub mod artefact;
pub mod dirs;
pub mod error;
pub mod install;
pub mod output;
pub mod paths;
pub mod temp;
