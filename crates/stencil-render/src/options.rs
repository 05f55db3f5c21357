//! Per-call rendering options.

use std::collections::HashMap;

/// Options a host passes along with each render call.
///
/// The MiniJinja adapter accepts these for compatibility with the host
/// contract but does not act on them. `RenderingOptions::default()` is always
/// a valid argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderingOptions {
    /// Free-form string settings for engines that understand them.
    pub extras: HashMap<String, String>,
}

impl RenderingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extra setting.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Gets an extra setting by key.
    pub fn get_extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(|s| s.as_str())
    }
}
