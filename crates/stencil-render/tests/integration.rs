//! Integration tests for stencil-render.
//!
//! These exercise the engine the way a host framework does: configure once
//! with a views directory, then render by template name.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use stencil_render::{
    template_file_name, ErrorKind, Payload, RenderContext, RenderingOptions,
    StencilTemplateEngine, StencilError, TemplateEngine, RESERVED_LOADER_KEY,
};
use tempfile::TempDir;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Friend {
    first_name: String,
    last_name: String,
}

fn friend(first: &str, last: &str) -> Friend {
    Friend {
        first_name: first.into(),
        last_name: last.into(),
    }
}

fn views(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn configured(dir: &Path) -> StencilTemplateEngine {
    let mut engine = StencilTemplateEngine::new();
    engine.configure(&[dir.display().to_string()]);
    engine
}

fn options() -> RenderingOptions {
    RenderingOptions::default()
}

// ============================================================================
// String-keyed context
// ============================================================================

#[test]
fn hello_world() {
    let dir = views(&[("hello.stencil", "Hello, {{ name }}!")]);
    let engine = configured(dir.path());
    let context: RenderContext = [("name", "World")].into_iter().collect();

    let output = engine
        .render("hello.stencil", &context, &options(), "hello.stencil")
        .unwrap();
    assert_eq!(output, "Hello, World!");
}

#[test]
fn host_appends_default_extension() {
    let dir = views(&[("hello.stencil", "Hello, {{ name }}!")]);
    let engine = configured(dir.path());
    let context: RenderContext = [("name", "World")].into_iter().collect();

    let name = template_file_name(&engine, "hello");
    assert_eq!(name, "hello.stencil");
    let output = engine.render(&name, &context, &options(), &name).unwrap();
    assert_eq!(output, "Hello, World!");
}

#[test]
fn rendering_is_idempotent() {
    let dir = views(&[(
        "list.stencil",
        "{% for item in items %}{{ loop.index }}. {{ item }}\n{% endfor %}",
    )]);
    let engine = configured(dir.path());
    let mut context = RenderContext::new();
    context.insert_serialize("items", &["alpha", "beta", "gamma"]);

    let first = engine
        .render("list.stencil", &context, &options(), "list.stencil")
        .unwrap();
    let second = engine
        .render("list.stencil", &context, &options(), "list.stencil")
        .unwrap();
    assert_eq!(first, "1. alpha\n2. beta\n3. gamma\n");
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn caller_loader_value_is_replaced() {
    let dir = views(&[(
        "loader_check.stencil",
        "{% if loader is string %}{{ loader }}\
         {% else %}{{ loader.exists('loader_check.stencil') }}{% endif %}",
    )]);
    let engine = configured(dir.path());
    let context: RenderContext = [(RESERVED_LOADER_KEY, "bogus")].into_iter().collect();

    let output = engine
        .render("loader_check.stencil", &context, &options(), "loader_check.stencil")
        .unwrap();
    assert_eq!(output, "true");
}

#[test]
fn loader_displays_its_search_paths() {
    let dir = views(&[("loader.stencil", "{{ loader }}")]);
    let engine = configured(dir.path());

    let output = engine
        .render("loader.stencil", &RenderContext::new(), &options(), "loader.stencil")
        .unwrap();
    assert_eq!(
        output,
        format!("FileSystemLoader(paths: [{:?}])", dir.path().display().to_string())
    );
}

#[test]
fn template_can_load_sources_through_loader() {
    let dir = views(&[
        ("source.stencil", "{{ loader.load('snippet.stencil') }}"),
        ("snippet.stencil", "{{ not_rendered }}"),
    ]);
    let engine = configured(dir.path());

    let output = engine
        .render("source.stencil", &RenderContext::new(), &options(), "source.stencil")
        .unwrap();
    assert_eq!(output, "{{ not_rendered }}");
}

#[test]
fn render_failure_keeps_engine_error() {
    let dir = views(&[("broken.stencil", "{% for x in %}")]);
    let engine = configured(dir.path());

    let err = engine
        .render("broken.stencil", &RenderContext::new(), &options(), "broken.stencil")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailed);
    assert!(err.to_string().contains("broken.stencil"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn concurrent_renders_share_engine() {
    let dir = views(&[("hello.stencil", "Hello, {{ name }}!")]);
    let engine = configured(dir.path());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;
                scope.spawn(move || {
                    let context: RenderContext =
                        [("name", format!("thread {}", i))].into_iter().collect();
                    engine
                        .render("hello.stencil", &context, &options(), "hello.stencil")
                        .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("Hello, thread {}!", i));
        }
    });
}

// ============================================================================
// Typed payloads
// ============================================================================

#[test]
fn record_bound_to_key() {
    let dir = views(&[(
        "friend.stencil",
        "{{ friend.firstName }} {{ friend.lastName }}|{{ firstName }}",
    )]);
    let engine = configured(dir.path());
    let jack = friend("Jack", "Sparrow");

    let output = engine
        .render_value(
            "friend.stencil",
            Payload::record(&jack),
            Some("friend"),
            &options(),
            "friend.stencil",
        )
        .unwrap();
    assert_eq!(output, "Jack Sparrow|");
}

#[test]
fn record_fields_become_context_keys() {
    let dir = views(&[("friend.stencil", "{{ firstName }} {{ lastName }}")]);
    let engine = configured(dir.path());
    let jack = friend("Jack", "Sparrow");

    let output = engine
        .render_value(
            "friend.stencil",
            Payload::record(&jack),
            None,
            &options(),
            "friend.stencil",
        )
        .unwrap();
    assert_eq!(output, "Jack Sparrow");
}

#[test]
fn collection_needs_a_key() {
    let dir = views(&[("friends.stencil", "")]);
    let engine = configured(dir.path());
    let friends = vec![friend("Jack", "Sparrow"), friend("Captain", "America")];

    let err = engine
        .render_value(
            "friends.stencil",
            Payload::collection(&friends),
            None,
            &options(),
            "friends.stencil",
        )
        .unwrap_err();
    assert!(matches!(err, StencilError::MissingKeyForCollection));
}

#[test]
fn collection_with_key() {
    let dir = views(&[(
        "friends.stencil",
        "{% for f in friends %}{{ f.firstName }} {{ f.lastName }}; {% endfor %}",
    )]);
    let engine = configured(dir.path());
    let friends = vec![friend("Jack", "Sparrow"), friend("Captain", "America")];

    let output = engine
        .render_value(
            "friends.stencil",
            Payload::collection(&friends),
            Some("friends"),
            &options(),
            "friends.stencil",
        )
        .unwrap();
    assert_eq!(output, "Jack Sparrow; Captain America; ");
}

#[test]
fn scalar_payload_without_key_is_not_a_mapping() {
    let dir = views(&[("page.stencil", "")]);
    let engine = configured(dir.path());

    let err = engine
        .render_value(
            "page.stencil",
            Payload::record(&"just a string"),
            None,
            &options(),
            "page.stencil",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAMapping);
}

#[test]
fn typed_render_failure_reports_context() {
    let dir = views(&[]);
    let engine = configured(dir.path());
    let jack = friend("Jack", "Sparrow");

    let err = engine
        .render_value(
            "missing.stencil",
            Payload::record(&jack),
            None,
            &options(),
            "missing.stencil",
        )
        .unwrap_err();
    let context = err.context().unwrap();
    let keys: Vec<&str> = context.keys().collect();
    assert_eq!(keys, vec!["firstName", "lastName", "loader"]);
}

#[test]
fn vec_and_set_records_need_a_key() {
    let dir = views(&[("friends.stencil", "")]);
    let engine = configured(dir.path());
    let friends = vec![friend("Jack", "Sparrow"), friend("Captain", "America")];
    let ids: BTreeSet<u32> = [1, 2].into_iter().collect();

    let err = engine
        .render_value(
            "friends.stencil",
            Payload::record(&friends),
            None,
            &options(),
            "friends.stencil",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKeyForCollection);

    let err = engine
        .render_value(
            "friends.stencil",
            Payload::record(&ids),
            None,
            &options(),
            "friends.stencil",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKeyForCollection);
}

struct Unencodable;

impl Serialize for Unencodable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("cannot encode"))
    }
}

#[test]
fn keyed_unencodable_value_fails_before_rendering() {
    let dir = views(&[("static.stencil", "static")]);
    let engine = configured(dir.path());

    let err = engine
        .render_value(
            "static.stencil",
            Payload::record(&Unencodable),
            Some("value"),
            &options(),
            "static.stencil",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodeFailed);
}

#[test]
fn unencodable_array_record_needs_a_key() {
    let dir = views(&[("static.stencil", "static")]);
    let engine = configured(dir.path());

    let err = engine
        .render_value(
            "static.stencil",
            Payload::record(&[Unencodable, Unencodable]),
            None,
            &options(),
            "static.stencil",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingKeyForCollection);
}
