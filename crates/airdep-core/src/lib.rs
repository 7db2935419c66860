//! Core data types for airdep.
//!
//! This crate defines everything the resolution engine consumes and
//! produces: heterogeneous attribute values, package records, the catalog,
//! the `airdep.json` manifest, file-backed repositories with `{key}`
//! substitution, the `airbuild.json` build manifest, and user configuration.
//!
//! This crate performs file I/O only; it knows nothing about version
//! ordering or constraint semantics.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "airdep.json";

/// Default file name of the generated build manifest.
pub const BUILD_MANIFEST_FILE: &str = "airbuild.json";

pub mod build_manifest;
pub mod catalog;
pub mod config;
pub mod manifest;
pub mod package_file;
pub mod record;
pub mod repository;
pub mod substitution;
pub mod value;
