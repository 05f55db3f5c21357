//! File-based template loader over an ordered list of search paths.
//!
//! [`FileSystemLoader`] resolves a template name by asking each search path in
//! turn, first hit wins. Each lookup is delegated to MiniJinja's
//! [`path_loader`](minijinja::path_loader), which also refuses names that try
//! to escape the directory (`../secret`).
//!
//! The loader does two jobs during a render:
//!
//! 1. It is installed on the [`Environment`](minijinja::Environment), so
//!    `{% include %}`, `{% extends %}` and `{% import %}` resolve against the
//!    same search paths as the top-level template.
//! 2. It is exposed to templates under the reserved `loader` context key:
//!
//! ```jinja
//! {% if loader.exists("partials/footer.stencil") %}
//!   {% include "partials/footer.stencil" %}
//! {% endif %}
//! searched: {{ loader.paths | join(", ") }}
//! ```
//!
//! Nothing is cached; every lookup reads from disk.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use minijinja::value::{from_args, Enumerator, Object, Value};
use minijinja::{Error, ErrorKind, State};

/// Resolves template names against an ordered set of directories.
///
/// Cloning is cheap: clones share the same path list.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    paths: Arc<[PathBuf]>,
}

impl FileSystemLoader {
    /// Creates a loader searching `paths` in order.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The search paths, in lookup order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Loads the source of `name` from the first search path containing it.
    ///
    /// Returns `Ok(None)` when no search path has the template.
    pub fn load(&self, name: &str) -> Result<Option<String>, Error> {
        for dir in self.paths.iter() {
            let lookup = minijinja::path_loader(dir.clone());
            if let Some(source) = lookup(name)? {
                return Ok(Some(source));
            }
        }
        Ok(None)
    }

    /// Returns true if some search path contains `name`.
    pub fn exists(&self, name: &str) -> bool {
        matches!(self.load(name), Ok(Some(_)))
    }

    fn path_strings(&self) -> Vec<String> {
        self.paths.iter().map(|p| p.display().to_string()).collect()
    }
}

impl Object for FileSystemLoader {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "paths" => Some(Value::from_serialize(self.path_strings())),
            _ => None,
        }
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&["paths"])
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        write!(f, "FileSystemLoader(paths: {:?})", self.path_strings())
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State,
        name: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match name {
            "load" => {
                let (template,): (&str,) = from_args(args)?;
                Ok(self.load(template)?.map(Value::from).unwrap_or_default())
            }
            "exists" => {
                let (template,): (&str,) = from_args(args)?;
                Ok(Value::from(self.exists(template)))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("loader has no method named {}", name),
            )),
        }
    }
}
