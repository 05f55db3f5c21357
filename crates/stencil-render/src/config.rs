//! Engine configuration.
//!
//! [`EngineConfig`] collects the settings applied to every rendering
//! environment. It deserializes from YAML (or any serde format), so hosts can
//! keep it alongside the rest of their application config:
//!
//! ```rust
//! use stencil_render::{EngineConfig, UndefinedMode};
//!
//! let config = EngineConfig::from_yaml(r#"
//! search_paths:
//!   - ./views
//!   - ./shared/views
//! undefined: strict
//! trim_blocks: true
//! "#).unwrap();
//!
//! assert_eq!(config.search_paths, vec!["./views", "./shared/views"]);
//! assert_eq!(config.undefined, UndefinedMode::Strict);
//! assert!(!config.lstrip_blocks);
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How templates treat references to values missing from the context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedMode {
    /// Missing values render as empty text.
    #[default]
    Lenient,
    /// Any use of a missing value fails the render.
    Strict,
    /// Like lenient, but attribute access on missing values is also allowed.
    Chainable,
}

impl From<UndefinedMode> for UndefinedBehavior {
    fn from(mode: UndefinedMode) -> Self {
        match mode {
            UndefinedMode::Lenient => UndefinedBehavior::Lenient,
            UndefinedMode::Strict => UndefinedBehavior::Strict,
            UndefinedMode::Chainable => UndefinedBehavior::Chainable,
        }
    }
}

/// Settings for [`StencilTemplateEngine`](crate::StencilTemplateEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directories searched for templates, in order.
    pub search_paths: Vec<String>,
    pub undefined: UndefinedMode,
    /// Remove the first newline after a block tag.
    pub trim_blocks: bool,
    /// Strip leading whitespace before a block tag.
    pub lstrip_blocks: bool,
    /// Keep the final newline of a template.
    pub keep_trailing_newline: bool,
}

impl EngineConfig {
    /// Parses a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Applies the environment-level settings to `env`.
    pub(crate) fn apply(&self, env: &mut Environment<'static>) {
        env.set_undefined_behavior(self.undefined.into());
        env.set_trim_blocks(self.trim_blocks);
        env.set_lstrip_blocks(self.lstrip_blocks);
        env.set_keep_trailing_newline(self.keep_trailing_newline);
    }
}
