//! Artifact persistence for bootstrap snapshots and manifests.
//!
//! The store maps one logical client to a single markup snapshot plus one
//! manifest payload per observed version. There is no index file: presence
//! is discovered by listing with a naming-convention filter. The
//! [`ArtifactStore`] trait keeps the backend pluggable; [`DirStore`] is the
//! directory-backed implementation.

pub mod dir;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

pub use dir::DirStore;

/// A stored manifest discovered by listing.
///
/// `file_name` doubles as the source identifier handed to the network
/// emulator (it becomes the stubbed service worker's `scriptURL`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    pub file_name: String,
    pub version: String,
}

/// A version-keyed manifest payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub version: String,
    pub payload: Value,
}

/// Durable mapping from one cache location to a snapshot and a set of
/// version-keyed manifests.
///
/// Reads that can miss return `Option`/empty rather than an error: an
/// unpopulated cache is an expected state, not a failure.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create the backing storage if absent. Idempotent.
    async fn ensure_ready(&self) -> Result<(), Error>;

    /// Overwrite the single markup snapshot.
    async fn write_snapshot(&self, markup: &str) -> Result<(), Error>;

    /// Read the markup snapshot, or `None` if storage or snapshot is absent.
    async fn read_snapshot(&self) -> Result<Option<String>, Error>;

    /// Write the manifest payload for a version. Last write wins per version.
    async fn write_manifest(&self, version: &str, payload: &Value) -> Result<(), Error>;

    /// List stored manifests; empty when storage is absent or holds none.
    async fn list_manifests(&self) -> Result<Vec<ManifestFile>, Error>;

    /// Parse and return a stored manifest payload.
    async fn read_manifest(&self, file: &ManifestFile) -> Result<Value, Error>;
}
