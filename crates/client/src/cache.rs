//! The persist/restore orchestrator.
//!
//! `persist` captures the live bootstrap state (markup plus the manifest
//! the app fetches for the version referenced in that markup) into the
//! artifact store. `restore` replays whatever the store holds into a fresh
//! session: snapshot first, then one network-emulation install per stored
//! manifest.

use coldstart_core::{ArtifactStore, CacheConfig, DirStore, Error, ManifestEntry, extract_version};
use std::path::PathBuf;

use crate::emulator::NetworkEmulator;
use crate::session::Session;

/// Versioned bootstrap cache for one logical client.
///
/// One instance owns one cache directory and drives one session at a time;
/// callers must not invoke `persist` and `restore` concurrently against
/// the same directory.
pub struct SessionCache<S = DirStore> {
    store: S,
}

impl SessionCache<DirStore> {
    /// Cache backed by a directory at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { store: DirStore::new(cache_dir) }
    }

    /// Cache backed by a directory from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self { store: DirStore::from_config(config) }
    }
}

impl<S: ArtifactStore> SessionCache<S> {
    /// Cache backed by a custom artifact store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// The artifact store behind this cache.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Capture the session's current bootstrap state into the store.
    ///
    /// Reads the live markup, extracts the manifest version it references,
    /// writes the snapshot, then fetches the manifest payload live from the
    /// session as ground truth and writes it under that version. Failures
    /// propagate; a snapshot written without its manifest is a recoverable
    /// inconsistency (a later restore installs no interception for it).
    pub async fn persist(&self, session: &dyn Session) -> Result<(), Error> {
        let markup = session.content().await?;
        let version = extract_version(&markup);

        self.store.ensure_ready().await?;
        self.store.write_snapshot(&markup).await?;

        let payload = session.evaluate(&manifest_fetch_script(&version)).await?;
        self.store.write_manifest(&version, &payload).await?;

        tracing::info!("persisted bootstrap state for version {version}");
        Ok(())
    }

    /// Replay stored bootstrap state into a fresh session.
    ///
    /// An unpopulated cache (missing directory or snapshot) is a no-op.
    /// A corrupt manifest aborts the remaining installs and propagates;
    /// interception already installed for earlier manifests stays in
    /// effect.
    pub async fn restore(&self, session: &dyn Session) -> Result<(), Error> {
        let Some(markup) = self.store.read_snapshot().await? else {
            tracing::debug!("no snapshot cached, skipping restore");
            return Ok(());
        };

        session.set_content(&markup).await?;

        let manifests = self.store.list_manifests().await?;
        let count = manifests.len();
        for file in manifests {
            let payload = self.store.read_manifest(&file).await?;
            let entry = ManifestEntry { version: file.version, payload };
            NetworkEmulator::install(session, &entry, &file.file_name).await?;
        }

        tracing::info!("restored bootstrap state ({count} manifest version(s))");
        Ok(())
    }
}

/// Script evaluated in the live session to fetch manifest ground truth.
fn manifest_fetch_script(version: &str) -> String {
    let file_name = DirStore::manifest_file_name(version);
    format!("fetch('{file_name}').then((response) => response.json())")
}
