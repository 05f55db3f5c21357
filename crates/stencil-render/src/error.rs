//! Error types for the template engine adapter.
//!
//! [`StencilError`] covers every way a render call can fail. Each variant maps
//! to one [`ErrorKind`], which hosts can use to pick a response without
//! matching on variant payloads.

use crate::context::RenderContext;

/// Coarse classification of a [`StencilError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No search paths were configured before rendering.
    NoSearchPaths,
    /// The deprecated two-argument render entry point was called.
    DeprecatedMethod,
    /// A typed payload could not be serialized.
    EncodeFailed,
    /// A typed payload serialized to something other than a map.
    NotAMapping,
    /// A collection payload was given without a binding key.
    MissingKeyForCollection,
    /// The template engine rejected the template or context.
    RenderFailed,
}

/// Error type for all adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
    /// Render was called while the search path list was empty.
    #[error("no template search paths configured; call configure first")]
    NoSearchPaths,

    /// The legacy `(file_path, context)` entry point was used.
    #[error(
        "render(file_path, context) is deprecated; \
         use render(file_path, context, options, template_name) instead"
    )]
    DeprecatedMethod,

    /// The typed payload failed to serialize.
    #[error("unable to encode value: {source}")]
    EncodeFailed {
        #[source]
        source: serde_json::Error,
    },

    /// The serialized payload was not a string-keyed map.
    #[error("encoded value is {found}, expected a map of string keys")]
    NotAMapping { found: &'static str },

    /// A sequence or set payload was passed without a key to bind it to.
    #[error("a collection cannot be used as a template context without a key")]
    MissingKeyForCollection,

    /// The template engine failed; `context` is the context it was given,
    /// including the injected loader.
    #[error("unable to render template '{template}': {source}")]
    RenderFailed {
        template: String,
        context: RenderContext,
        #[source]
        source: minijinja::Error,
    },
}

impl StencilError {
    /// Returns the kind tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StencilError::NoSearchPaths => ErrorKind::NoSearchPaths,
            StencilError::DeprecatedMethod => ErrorKind::DeprecatedMethod,
            StencilError::EncodeFailed { .. } => ErrorKind::EncodeFailed,
            StencilError::NotAMapping { .. } => ErrorKind::NotAMapping,
            StencilError::MissingKeyForCollection => ErrorKind::MissingKeyForCollection,
            StencilError::RenderFailed { .. } => ErrorKind::RenderFailed,
        }
    }

    /// The augmented context of a failed render, if this is a render failure.
    pub fn context(&self) -> Option<&RenderContext> {
        match self {
            StencilError::RenderFailed { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// Error type for loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
