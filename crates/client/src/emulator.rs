//! Network emulation from cached manifest data.
//!
//! For each stored manifest the emulator installs a pre-load script that
//! stubs service-worker registration and answers manifest fetches from the
//! cached payload. Installation must take effect before any of the target
//! page's own scripts run: if the application checks for a service worker
//! or fetches its manifest first, the emulation is ineffective. Sessions
//! that cannot guarantee that ordering fail the install outright.

use coldstart_core::{Error, ManifestEntry};

use crate::session::Session;

/// Installs fetch and service-worker overrides into a live session.
pub struct NetworkEmulator;

impl NetworkEmulator {
    /// Install interception for one manifest entry.
    ///
    /// `source` is the stored file identifier; it becomes the stubbed
    /// service worker's `scriptURL`. Installs are independent per entry:
    /// later installs layer over earlier ones, which is fine since every
    /// layer stubs registration equivalently and only the manifest-suffix
    /// check decides which fetches are answered from cache.
    pub async fn install(session: &dyn Session, entry: &ManifestEntry, source: &str) -> Result<(), Error> {
        let script = Self::preload_script(entry, source)?;
        session.install_preload_hook(&script).await?;
        tracing::debug!("installed network emulation for version {} ({source})", entry.version);
        Ok(())
    }

    /// Build the pre-load override script for one manifest entry.
    ///
    /// Payload and source are embedded as JSON so arbitrary cached content
    /// cannot break out of the script. The original `window.fetch` is
    /// captured before the override so non-manifest requests pass through
    /// to the real network.
    fn preload_script(entry: &ManifestEntry, source: &str) -> Result<String, Error> {
        let payload = serde_json::to_string(&entry.payload)
            .map_err(|e| Error::Session(format!("encode manifest payload for injection: {e}")))?;
        let source = serde_json::to_string(source)
            .map_err(|e| Error::Session(format!("encode source identifier for injection: {e}")))?;

        Ok(format!(
            r#"(() => {{
    const payload = {payload};
    const source = {source};
    window.navigator.serviceWorker.register = () => Promise.resolve({{
        scope: '/',
        scriptURL: source
    }});
    const passthrough = window.fetch.bind(window);
    window.fetch = (resource, ...rest) => {{
        if (String(resource).endsWith('manifest.json')) {{
            return Promise.resolve({{ json: () => payload }});
        }}
        return passthrough(resource, ...rest);
    }};
}})();"#
        ))
    }
}
