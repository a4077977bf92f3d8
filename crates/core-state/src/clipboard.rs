//! Clipboard with an internal copy and an optional OS-backed provider.
//!
//! The internal copy is always written. Provider failures are logged and the
//! internal copy is used instead.

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard access failed: {0}")]
    Access(String),
}

/// System clipboard seam.
pub trait ClipboardProvider {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn read(&mut self) -> Result<String, ClipboardError>;
}

#[derive(Default)]
pub struct Clipboard {
    internal: String,
    provider: Option<Box<dyn ClipboardProvider>>,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("internal_len", &self.internal.len())
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: Box<dyn ClipboardProvider>) -> Self {
        Self {
            internal: String::new(),
            provider: Some(provider),
        }
    }

    pub fn set_provider(&mut self, provider: Option<Box<dyn ClipboardProvider>>) {
        self.provider = provider;
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn copy(&mut self, text: &str) {
        self.internal.clear();
        self.internal.push_str(text);
        if let Some(p) = self.provider.as_mut()
            && let Err(e) = p.write(text)
        {
            warn!(target: "state.clipboard", error = %e, "provider_write_failed");
        }
    }

    /// Provider text when readable and non-empty, else the internal copy.
    pub fn paste(&mut self) -> String {
        if let Some(p) = self.provider.as_mut() {
            match p.read() {
                Ok(text) if !text.is_empty() => return text,
                Ok(_) => {}
                Err(e) => {
                    warn!(target: "state.clipboard", error = %e, "provider_read_failed");
                }
            }
        }
        self.internal.clone()
    }

    pub fn internal(&self) -> &str {
        &self.internal
    }
}
