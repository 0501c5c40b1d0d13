//! Release artefact resolution, retrieval, and verification.
//!
//! This module implements the domain model for fetching a pinned Hugo
//! release archive: naming the artefact for the host platform, downloading
//! it, checking its digest against the checksum registry, and extracting
//! the binary.
//!
//! # Sub-modules
//!
//! - [`download`] — Archive download trait and HTTP implementation.
//! - [`error`] — Semantic error types for validation failures.
//! - [`extraction`] — Zip and gzip extraction with path traversal protection.
//! - [`naming`] — Release archive naming policy (`ArtefactName`).
//! - [`platform`] — Host platform identification (`Platform`).
//! - [`registry`] — Checksum registry (`ChecksumRegistry`).
//! - [`sha256_digest`] — SHA-256 digest newtype (`Sha256Digest`).
//! - [`verification`] — Digest computation and archive verification.

pub mod download;
pub mod error;
pub mod extraction;
pub mod naming;
pub mod platform;
pub mod registry;
pub mod sha256_digest;
pub mod verification;
