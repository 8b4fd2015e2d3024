//! Side channel for failures the logger refuses to propagate
//!
//! Write failures never reach the caller of `emit`. They are printed to
//! stderr and, when configured, handed to a user callback so hosts can
//! count or surface them.

use super::error::LoggerError;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with every swallowed write failure
pub type WriteFailureCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

#[derive(Clone, Default)]
pub struct FallbackReporter {
    callback: Option<WriteFailureCallback>,
    silent: bool,
}

impl FallbackReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also forward failures to `callback`
    #[must_use]
    pub fn with_callback(mut self, callback: WriteFailureCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Stop printing to stderr; the callback, if any, still fires
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn report(&self, error: &LoggerError) {
        if !self.silent {
            eprintln!("[LOGGER WARNING] log writing failed. {}", error);
        }
        if let Some(ref callback) = self.callback {
            callback(error);
        }
    }
}

impl fmt::Debug for FallbackReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackReporter")
            .field("callback", &self.callback.is_some())
            .field("silent", &self.silent)
            .finish()
    }
}
