//! The contract between a web framework and a template engine.
//!
//! A host framework keeps one [`TemplateEngine`] per file suffix. At startup
//! it calls [`configure`](TemplateEngine::configure) with its views
//! directories; when a handler renders a view it appends the engine's
//! [`file_extension`](TemplateEngine::file_extension) to bare names (see
//! [`template_file_name`]) and calls one of the render methods.

use std::path::Path;

use serde::Serialize;

use crate::context::RenderContext;
use crate::options::RenderingOptions;
use crate::payload::Payload;

/// A template engine a host framework can delegate view rendering to.
pub trait TemplateEngine: Send + Sync {
    /// Error returned by the render methods.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Suffix of template files this engine renders, without the dot.
    fn file_extension(&self) -> &str;

    /// Replaces the directories templates are looked up in.
    ///
    /// Takes `&mut self`: search paths cannot change while a render that
    /// borrows the engine is running.
    fn configure(&mut self, search_paths: &[String]);

    /// Old two-argument entry point. Always fails.
    #[deprecated(note = "use render(file_path, context, options, template_name)")]
    fn render_legacy(&self, file_path: &str, context: &RenderContext)
        -> Result<String, Self::Error>;

    /// Renders `template_name` with a string-keyed context.
    ///
    /// `file_path` is the host's resolved path for the view. Engines that
    /// look templates up by name through their own loader may ignore it.
    fn render(
        &self,
        file_path: &str,
        context: &RenderContext,
        options: &RenderingOptions,
        template_name: &str,
    ) -> Result<String, Self::Error>;

    /// Renders `template_name` with a typed payload.
    ///
    /// With `key`, the payload is bound to that single context name. Without
    /// it, a record's fields become the context.
    fn render_value<T: Serialize>(
        &self,
        file_path: &str,
        payload: Payload<'_, T>,
        key: Option<&str>,
        options: &RenderingOptions,
        template_name: &str,
    ) -> Result<String, Self::Error>
    where
        Self: Sized;
}

/// Appends the engine's file extension to a bare template name.
///
/// Names that already have an extension are returned unchanged.
///
/// ```rust
/// use stencil_render::{template_file_name, StencilTemplateEngine};
///
/// let engine = StencilTemplateEngine::new();
/// assert_eq!(template_file_name(&engine, "hello"), "hello.stencil");
/// assert_eq!(template_file_name(&engine, "users/list"), "users/list.stencil");
/// assert_eq!(template_file_name(&engine, "page.html"), "page.html");
/// ```
pub fn template_file_name<E: TemplateEngine + ?Sized>(engine: &E, name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{}.{}", name, engine.file_extension())
    }
}
