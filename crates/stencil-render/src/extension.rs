//! Customization hooks forwarded to the template engine.
//!
//! An [`Extension`] registers filters, tests, functions or globals on the
//! MiniJinja [`Environment`] built for each render. [`Extensions`] is the
//! ordered set of them handed to the adapter at construction; the adapter
//! applies it to every fresh environment and otherwise leaves it alone.
//!
//! # Example
//!
//! ```rust
//! use minijinja::Environment;
//! use stencil_render::{Extensions, StencilTemplateEngine};
//!
//! let extensions = Extensions::new().with(|env: &mut Environment<'static>| {
//!     env.add_filter("shout", |value: String| value.to_uppercase());
//! });
//!
//! let engine = StencilTemplateEngine::with_extensions(extensions);
//! ```

use std::fmt;
use std::sync::Arc;

use minijinja::Environment;

/// A unit of engine customization.
///
/// Implemented for closures taking `&mut Environment<'static>`, which covers
/// most uses:
///
/// ```rust
/// use minijinja::Environment;
/// use stencil_render::Extension;
///
/// fn site_globals(env: &mut Environment<'static>) {
///     env.add_global("site_name", "Example");
/// }
///
/// fn takes_extension(_: impl Extension) {}
/// takes_extension(site_globals);
/// ```
pub trait Extension: Send + Sync {
    /// Registers this extension's filters, tests, functions or globals.
    fn register(&self, env: &mut Environment<'static>);
}

impl<F> Extension for F
where
    F: Fn(&mut Environment<'static>) + Send + Sync,
{
    fn register(&self, env: &mut Environment<'static>) {
        (self)(env)
    }
}

/// The set of extensions applied to every rendering environment.
///
/// Cheap to clone; extensions are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct Extensions {
    entries: Vec<Arc<dyn Extension>>,
}

impl Extensions {
    /// Creates an empty extension set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension, builder style.
    pub fn with<E: Extension + 'static>(mut self, extension: E) -> Self {
        self.add(extension);
        self
    }

    /// Adds an extension.
    pub fn add<E: Extension + 'static>(&mut self, extension: E) {
        self.entries.push(Arc::new(extension));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers every extension on `env`, in insertion order.
    pub fn apply(&self, env: &mut Environment<'static>) {
        for extension in &self.entries {
            extension.register(env);
        }
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.entries.len())
            .finish()
    }
}
