//! MiniJinja implementation of [`TemplateEngine`].
//!
//! Every render builds a fresh [`FileSystemLoader`] and [`Environment`], so
//! there is no state shared between calls beyond the engine's configuration.
//! Template edits on disk are picked up on the next render.

use std::path::PathBuf;

use minijinja::{Environment, Value};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::engine::TemplateEngine;
use crate::error::StencilError;
use crate::extension::Extensions;
use crate::loader::FileSystemLoader;
use crate::options::RenderingOptions;
use crate::payload::Payload;

/// File extension of templates rendered by [`StencilTemplateEngine`].
pub const DEFAULT_FILE_EXTENSION: &str = "stencil";

/// A [`TemplateEngine`] backed by MiniJinja.
///
/// # Example
///
/// ```rust
/// use std::fs;
/// use stencil_render::{RenderContext, RenderingOptions, StencilTemplateEngine, TemplateEngine};
///
/// let views = tempfile::tempdir().unwrap();
/// fs::write(views.path().join("hello.stencil"), "Hello, {{ name }}!").unwrap();
///
/// let mut engine = StencilTemplateEngine::new();
/// engine.configure(&[views.path().display().to_string()]);
///
/// let mut context = RenderContext::new();
/// context.insert("name", "World");
///
/// let output = engine
///     .render("hello.stencil", &context, &RenderingOptions::default(), "hello.stencil")
///     .unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
///
/// # Typed payloads
///
/// ```rust
/// use std::fs;
/// use serde::Serialize;
/// use stencil_render::{Payload, RenderingOptions, StencilTemplateEngine, TemplateEngine};
///
/// #[derive(Serialize)]
/// struct Friend { name: String }
///
/// let views = tempfile::tempdir().unwrap();
/// fs::write(
///     views.path().join("friends.stencil"),
///     "{% for f in friends %}{{ f.name }};{% endfor %}",
/// ).unwrap();
///
/// let engine = StencilTemplateEngine::new().search_paths([views.path().display().to_string()]);
/// let friends = vec![Friend { name: "Jack".into() }, Friend { name: "Cap".into() }];
///
/// let output = engine
///     .render_value(
///         "friends.stencil",
///         Payload::collection(&friends),
///         Some("friends"),
///         &RenderingOptions::default(),
///         "friends.stencil",
///     )
///     .unwrap();
/// assert_eq!(output, "Jack;Cap;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StencilTemplateEngine {
    extensions: Extensions,
    config: EngineConfig,
    root_paths: Vec<PathBuf>,
}

impl StencilTemplateEngine {
    /// Creates an engine with no extensions and no search paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that applies `extensions` to every environment.
    pub fn with_extensions(extensions: Extensions) -> Self {
        Self {
            extensions,
            ..Self::default()
        }
    }

    /// Creates an engine from a config, taking its search paths as well.
    pub fn from_config(config: EngineConfig, extensions: Extensions) -> Self {
        let mut engine = Self {
            extensions,
            config,
            root_paths: Vec::new(),
        };
        let search_paths = engine.config.search_paths.clone();
        engine.configure(&search_paths);
        engine
    }

    /// Sets the search paths, builder style.
    pub fn search_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        self.configure(&paths);
        self
    }

    /// The current search paths, in lookup order.
    pub fn root_paths(&self) -> &[PathBuf] {
        &self.root_paths
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn environment(&self, loader: &FileSystemLoader) -> Environment<'static> {
        let mut env = Environment::new();
        self.config.apply(&mut env);
        let lookup = loader.clone();
        env.set_loader(move |name| lookup.load(name));
        self.extensions.apply(&mut env);
        env
    }
}

impl TemplateEngine for StencilTemplateEngine {
    type Error = StencilError;

    fn file_extension(&self) -> &str {
        DEFAULT_FILE_EXTENSION
    }

    fn configure(&mut self, search_paths: &[String]) {
        self.root_paths = search_paths.iter().map(PathBuf::from).collect();
        debug!(search_paths = ?self.root_paths, "configured template search paths");
    }

    fn render_legacy(
        &self,
        _file_path: &str,
        _context: &RenderContext,
    ) -> Result<String, StencilError> {
        Err(StencilError::DeprecatedMethod)
    }

    fn render(
        &self,
        file_path: &str,
        context: &RenderContext,
        _options: &RenderingOptions,
        template_name: &str,
    ) -> Result<String, StencilError> {
        if self.root_paths.is_empty() {
            return Err(StencilError::NoSearchPaths);
        }

        let loader = FileSystemLoader::new(self.root_paths.iter().cloned());
        let env = self.environment(&loader);
        let context = context.with_loader(Value::from_object(loader));

        debug!(
            template = template_name,
            file_path,
            search_paths = self.root_paths.len(),
            keys = ?context.keys().collect::<Vec<_>>(),
            "rendering template"
        );

        let rendered = env
            .get_template(template_name)
            .and_then(|template| template.render(context.to_value()));

        match rendered {
            Ok(output) => {
                trace!(template = template_name, bytes = output.len(), "rendered template");
                Ok(output)
            }
            Err(source) => {
                debug!(template = template_name, error = %source, "template render failed");
                Err(StencilError::RenderFailed {
                    template: template_name.to_string(),
                    context,
                    source,
                })
            }
        }
    }

    fn render_value<T: Serialize>(
        &self,
        file_path: &str,
        payload: Payload<'_, T>,
        key: Option<&str>,
        options: &RenderingOptions,
        template_name: &str,
    ) -> Result<String, StencilError> {
        if self.root_paths.is_empty() {
            return Err(StencilError::NoSearchPaths);
        }

        let context = payload.into_context(key)?;
        self.render(file_path, &context, options, template_name)
    }
}
