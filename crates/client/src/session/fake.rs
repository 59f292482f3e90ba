//! In-memory session used by emulator and cache tests.

use std::sync::Mutex;

use serde_json::Value;

use super::{Session, SessionError};

/// A fake [`Session`] that records every round-trip.
///
/// `evaluate` answers with a canned payload and logs the script;
/// `install_preload_hook` appends to `hooks` unless `supports_preload`
/// is false.
pub(crate) struct FakeSession {
    pub content: Mutex<String>,
    pub manifest_payload: Mutex<Value>,
    pub evaluated: Mutex<Vec<String>>,
    pub hooks: Mutex<Vec<String>>,
    pub supports_preload: bool,
}

impl FakeSession {
    pub fn new(content: &str, manifest_payload: Value) -> Self {
        Self {
            content: Mutex::new(content.to_string()),
            manifest_payload: Mutex::new(manifest_payload),
            evaluated: Mutex::new(Vec::new()),
            hooks: Mutex::new(Vec::new()),
            supports_preload: true,
        }
    }

    pub fn without_preload_support(content: &str) -> Self {
        Self { supports_preload: false, ..Self::new(content, Value::Null) }
    }
}

#[async_trait::async_trait]
impl Session for FakeSession {
    async fn content(&self) -> Result<String, SessionError> {
        Ok(self.content.lock().unwrap().clone())
    }

    async fn set_content(&self, markup: &str) -> Result<(), SessionError> {
        *self.content.lock().unwrap() = markup.to_string();
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, SessionError> {
        self.evaluated.lock().unwrap().push(script.to_string());
        Ok(self.manifest_payload.lock().unwrap().clone())
    }

    async fn install_preload_hook(&self, script: &str) -> Result<(), SessionError> {
        if !self.supports_preload {
            return Err(SessionError::PreloadUnsupported("fake session without preload".into()));
        }
        self.hooks.lock().unwrap().push(script.to_string());
        Ok(())
    }
}
