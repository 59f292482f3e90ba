//! Directory-backed artifact store.
//!
//! Layout inside the cache directory:
//! - `index.html` — the single markup snapshot, overwritten on every persist
//! - `manifest-<version>.json` — one JSON payload per observed version
//!
//! Filenames are fully determined by the version token, so distinct
//! versions never collide and repeated writes for one version are
//! last-write-wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use super::{ArtifactStore, ManifestFile};
use crate::Error;
use crate::config::CacheConfig;

/// Default file name for the markup snapshot.
pub const SNAPSHOT_FILE: &str = "index.html";

const MANIFEST_PREFIX: &str = "manifest-";
const MANIFEST_SUFFIX: &str = ".json";

/// Artifact store backed by a single cache directory.
///
/// The directory is owned exclusively by one logical client. It is created
/// lazily by [`ArtifactStore::ensure_ready`]; reads treat a missing
/// directory as an empty cache.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    snapshot_file: String,
}

impl DirStore {
    /// Create a store rooted at `root` with the default snapshot file name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), snapshot_file: SNAPSHOT_FILE.to_string() }
    }

    /// Create a store from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self { root: config.cache_dir.clone(), snapshot_file: config.snapshot_file.clone() }
    }

    /// The cache directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic manifest file name for a version token.
    pub fn manifest_file_name(version: &str) -> String {
        format!("{MANIFEST_PREFIX}{version}{MANIFEST_SUFFIX}")
    }

    fn parse_version(file_name: &str) -> Option<&str> {
        let version = file_name.strip_prefix(MANIFEST_PREFIX)?.strip_suffix(MANIFEST_SUFFIX)?;
        (!version.is_empty()).then_some(version)
    }
}

#[async_trait::async_trait]
impl ArtifactStore for DirStore {
    async fn ensure_ready(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::io(format!("create cache dir {}", self.root.display()), e))
    }

    async fn write_snapshot(&self, markup: &str) -> Result<(), Error> {
        let path = self.root.join(&self.snapshot_file);
        fs::write(&path, markup)
            .await
            .map_err(|e| Error::io(format!("write snapshot {}", path.display()), e))?;
        tracing::debug!("wrote snapshot {} ({} bytes)", path.display(), markup.len());
        Ok(())
    }

    async fn read_snapshot(&self) -> Result<Option<String>, Error> {
        let path = self.root.join(&self.snapshot_file);
        match fs::read_to_string(&path).await {
            Ok(markup) => Ok(Some(markup)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(format!("read snapshot {}", path.display()), e)),
        }
    }

    async fn write_manifest(&self, version: &str, payload: &Value) -> Result<(), Error> {
        let file_name = Self::manifest_file_name(version);
        let path = self.root.join(&file_name);
        let bytes = serde_json::to_vec(payload)
            .map_err(|e| Error::io("serialize manifest", std::io::Error::new(ErrorKind::InvalidData, e)))?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| Error::io(format!("write manifest {}", path.display()), e))?;
        tracing::debug!("wrote manifest {} for version {}", path.display(), version);
        Ok(())
    }

    async fn list_manifests(&self) -> Result<Vec<ManifestFile>, Error> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(format!("list cache dir {}", self.root.display()), e)),
        };

        let mut manifests = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| Error::io(format!("list cache dir {}", self.root.display()), e))?
        {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(version) = Self::parse_version(&file_name) {
                manifests.push(ManifestFile { version: version.to_string(), file_name });
            }
        }
        Ok(manifests)
    }

    async fn read_manifest(&self, file: &ManifestFile) -> Result<Value, Error> {
        let path = self.root.join(&file.file_name);
        let bytes = fs::read(&path)
            .await
            .map_err(|e| Error::io(format!("read manifest {}", path.display()), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::CorruptManifest { file: file.file_name.clone(), source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir) -> DirStore {
        DirStore::new(dir.path().join("cache"))
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.ensure_ready().await.unwrap();
        store.write_snapshot("<html>hi</html>").await.unwrap();

        let markup = store.read_snapshot().await.unwrap();
        assert_eq!(markup.as_deref(), Some("<html>hi</html>"));
    }

    #[tokio::test]
    async fn test_snapshot_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        store.write_snapshot("first").await.unwrap();
        store.write_snapshot("second").await.unwrap();

        assert_eq!(store.read_snapshot().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_missing_dir_is_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.read_snapshot().await.unwrap().is_none());
        assert!(store.list_manifests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_ready_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();
        store.ensure_ready().await.unwrap();
    }

    #[tokio::test]
    async fn test_manifest_roundtrip_and_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        store.write_manifest("1.0", &json!({"entries": []})).await.unwrap();
        store.write_manifest("1.1", &json!({"entries": [1]})).await.unwrap();

        let mut files = store.list_manifests().await.unwrap();
        files.sort_by(|a, b| a.version.cmp(&b.version));
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].version, "1.0");
        assert_eq!(files[0].file_name, "manifest-1.0.json");
        assert_eq!(files[1].version, "1.1");

        let payload = store.read_manifest(&files[1]).await.unwrap();
        assert_eq!(payload, json!({"entries": [1]}));
    }

    #[tokio::test]
    async fn test_manifest_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        store.write_manifest("1.0", &json!({"a": 1})).await.unwrap();
        store.write_manifest("1.0", &json!({"a": 2})).await.unwrap();

        let files = store.list_manifests().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(store.read_manifest(&files[0]).await.unwrap(), json!({"a": 2}));
    }

    #[tokio::test]
    async fn test_empty_version_token_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        tokio::fs::write(store.root().join("manifest-.json"), "{}").await.unwrap();
        assert!(store.list_manifests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_not_listed_as_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        store.write_snapshot("<html></html>").await.unwrap();
        assert!(store.list_manifests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        let path = store.root().join("manifest-1.0.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let files = store.list_manifests().await.unwrap();
        let err = store.read_manifest(&files[0]).await.unwrap_err();
        assert!(matches!(err, Error::CorruptManifest { .. }));
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig {
            cache_dir: dir.path().join("cache"),
            snapshot_file: "page.html".into(),
            ..Default::default()
        };
        let store = DirStore::from_config(&config);

        store.ensure_ready().await.unwrap();
        store.write_snapshot("<html></html>").await.unwrap();

        assert!(dir.path().join("cache").join("page.html").exists());
        assert_eq!(store.read_snapshot().await.unwrap().as_deref(), Some("<html></html>"));
    }

    #[test]
    fn test_manifest_file_name_deterministic() {
        assert_eq!(DirStore::manifest_file_name("2.3"), "manifest-2.3.json");
        assert_eq!(DirStore::manifest_file_name("default-version"), "manifest-default-version.json");
    }
}
