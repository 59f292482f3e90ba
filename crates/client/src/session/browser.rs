//! Headless Chrome/Chromium session using chromiumoxide.
//!
//! Pre-load hooks are installed through the Chrome DevTools Protocol's
//! `Page.addScriptToEvaluateOnNewDocument`, which guarantees the script
//! runs on every navigation before the document's own scripts execute.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use serde_json::Value;

use super::{Session, SessionError};

/// A [`Session`] backed by one chromiumoxide page.
pub struct BrowserSession {
    page: chromiumoxide::Page,
    evaluate_timeout: Duration,

    // Held so a self-launched browser outlives the session.
    _browser: Option<chromiumoxide::Browser>,
}

impl BrowserSession {
    /// Launch a headless browser and open a blank page.
    ///
    /// A background task drains Chrome DevTools Protocol events, as the
    /// chromiumoxide handler requires.
    pub async fn launch(evaluate_timeout: Duration) -> Result<Self, SessionError> {
        use chromiumoxide::browser::{Browser, BrowserConfig};
        use futures_util::StreamExt;

        let (browser, mut handler) = Browser::launch(
            BrowserConfig::builder()
                .build()
                .map_err(SessionError::Launch)?,
        )
        .await
        .map_err(|e| SessionError::Launch(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::Launch(format!("page open failed: {e}")))?;

        Ok(Self { page, evaluate_timeout, _browser: Some(browser) })
    }

    /// Wrap a page owned and navigated by an external driver.
    pub fn from_page(page: chromiumoxide::Page, evaluate_timeout: Duration) -> Self {
        Self { page, evaluate_timeout, _browser: None }
    }
}

#[async_trait::async_trait]
impl Session for BrowserSession {
    async fn content(&self) -> Result<String, SessionError> {
        self.page
            .content()
            .await
            .map_err(|e| SessionError::ContentRetrieval(e.to_string()))
    }

    async fn set_content(&self, markup: &str) -> Result<(), SessionError> {
        self.page
            .set_content(markup)
            .await
            .map_err(|e| SessionError::ContentInjection(e.to_string()))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, SessionError> {
        let params = EvaluateParams::builder()
            .expression(script)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(SessionError::Evaluation)?;

        let result = tokio::time::timeout(self.evaluate_timeout, self.page.evaluate(params))
            .await
            .map_err(|_| SessionError::Timeout(self.evaluate_timeout.as_millis() as u64))?
            .map_err(|e| SessionError::Evaluation(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| SessionError::Evaluation(format!("non-JSON result: {e}")))
    }

    async fn install_preload_hook(&self, script: &str) -> Result<(), SessionError> {
        let params = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(script)
            .build()
            .map_err(SessionError::PreloadUnsupported)?;

        self.page
            .execute(params)
            .await
            .map_err(|e| SessionError::PreloadUnsupported(e.to_string()))?;
        Ok(())
    }
}
