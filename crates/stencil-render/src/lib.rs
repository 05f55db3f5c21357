//! # Stencil Render - MiniJinja Views for Web Frameworks
//!
//! `stencil-render` plugs [MiniJinja](https://docs.rs/minijinja) into a web
//! framework's view layer. The framework hands over a template name and a
//! context; this crate finds the template in the configured views
//! directories, renders it, and returns the text.
//!
//! ## Core Concepts
//!
//! - [`TemplateEngine`]: The contract a host framework renders views through
//! - [`StencilTemplateEngine`]: The MiniJinja implementation of that contract
//! - [`RenderContext`]: String-keyed values visible to a template
//! - [`Payload`]: A typed record or collection rendered as context
//! - [`Extensions`]: Filters, tests, functions and globals added to the engine
//! - [`EngineConfig`]: Search paths and environment settings, loadable from YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use std::fs;
//! use stencil_render::{RenderContext, RenderingOptions, StencilTemplateEngine, TemplateEngine};
//!
//! let views = tempfile::tempdir().unwrap();
//! fs::write(views.path().join("hello.stencil"), "Hello, {{ name }}!").unwrap();
//!
//! let mut engine = StencilTemplateEngine::new();
//! engine.configure(&[views.path().display().to_string()]);
//!
//! let context: RenderContext = [("name", "World")].into_iter().collect();
//! let output = engine
//!     .render("hello.stencil", &context, &RenderingOptions::default(), "hello.stencil")
//!     .unwrap();
//! assert_eq!(output, "Hello, World!");
//! ```
//!
//! ## The `loader` Key
//!
//! Each render injects the [`FileSystemLoader`] into the context under
//! [`RESERVED_LOADER_KEY`] (`"loader"`), replacing any value the caller put
//! there. Includes and extends resolve through the same loader.
//!
//! ## Errors
//!
//! All failures are [`StencilError`] values; [`StencilError::kind`] gives the
//! [`ErrorKind`] for mapping to a response. Render failures keep both the
//! context that was rendered and the underlying MiniJinja error.

mod adapter;
pub mod config;
pub mod context;
mod engine;
mod error;
pub mod extension;
pub mod loader;
mod options;
pub mod payload;

// Engine contract
pub use engine::{template_file_name, TemplateEngine};

// MiniJinja adapter
pub use adapter::{StencilTemplateEngine, DEFAULT_FILE_EXTENSION};

// Error types
pub use error::{ConfigError, ErrorKind, StencilError};

pub use config::{EngineConfig, UndefinedMode};
pub use context::{RenderContext, RESERVED_LOADER_KEY};
pub use extension::{Extension, Extensions};
pub use loader::FileSystemLoader;
pub use options::RenderingOptions;
pub use payload::Payload;
