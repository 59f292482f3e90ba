//! Core types and storage for coldstart.
//!
//! This crate provides:
//! - Version extraction from captured markup
//! - The artifact store (directory-backed snapshot + manifest persistence)
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;
pub mod version;

pub use config::CacheConfig;
pub use error::Error;
pub use store::{ArtifactStore, DirStore, ManifestEntry, ManifestFile};
pub use version::{DEFAULT_VERSION, extract_version};
