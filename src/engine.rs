//! Template engine seam.
//!
//! The pipeline only knows two capabilities:
//!
//! - [`TemplateEngine`]: which files are pages, and how to turn a page plus
//!   its render context into markup.
//! - [`Formatter`](crate::pretty::Formatter): how to lay out that markup.
//!
//! [`HandlebarsEngine`] is the engine the CLI uses. Pages end in `.page.hbs`;
//! every other `.hbs` file under the source root is registered as a partial,
//! named by its path relative to the root without the extension:
//!
//! ```text
//! src/
//! ├── index.page.hbs          # page → target/index.html
//! ├── index.json              # sidecar data for index
//! └── partials/
//!     └── header.hbs          # {{> partials/header}}
//! ```

use crate::context::RenderContext;
use crate::walk::walk;
use handlebars::Handlebars;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template failure, carrying the engine's own message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait TemplateEngine {
    /// File name suffix that marks a file as a page source.
    fn page_suffix(&self) -> &str;

    /// Render the page at `path` with `context`.
    fn render(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError>;
}

pub const HANDLEBARS_PAGE_SUFFIX: &str = ".page.hbs";
const HANDLEBARS_EXTENSION: &str = "hbs";

/// Handlebars with every non-page template under the source root loaded as a
/// partial.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

/// A partial that failed to load. Reported like a page render failure.
#[derive(Error, Debug)]
#[error(
    "Error while loading partial [{}]:\n{message}\nbase directory (source directory): [{}]",
    .path.display(),
    .source_root.display()
)]
pub struct PartialError {
    pub path: PathBuf,
    pub message: String,
    pub source_root: PathBuf,
}

impl HandlebarsEngine {
    /// Build the engine, registering partials found under `source_root`.
    ///
    /// A missing source root simply means there are no partials yet.
    pub fn new(source_root: &Path) -> Result<Self, PartialError> {
        let mut registry = Handlebars::new();
        if source_root.is_dir() {
            register_partials(&mut registry, source_root)?;
        }
        Ok(Self { registry })
    }
}

fn register_partials(registry: &mut Handlebars<'static>, root: &Path) -> Result<(), PartialError> {
    let failed = |path: &Path, message: String| PartialError {
        path: path.to_path_buf(),
        message,
        source_root: root.to_path_buf(),
    };

    for record in walk(root) {
        let record = record.map_err(|e| failed(e.path().unwrap_or(root), e.to_string()))?;
        let is_template = record
            .relative_path
            .extension()
            .is_some_and(|e| e == HANDLEBARS_EXTENSION);
        if !is_template || record.file_name.ends_with(HANDLEBARS_PAGE_SUFFIX) {
            continue;
        }

        let name = partial_name(&record.relative_path);
        let source =
            fs::read_to_string(&record.path).map_err(|e| failed(&record.path, e.to_string()))?;
        registry
            .register_partial(&name, source)
            .map_err(|e| failed(&record.path, e.to_string()))?;
        debug!("Registered partial {} from {}", name, record.path.display());
    }
    Ok(())
}

/// `partials/header.hbs` → `partials/header`
fn partial_name(relative_path: &Path) -> String {
    relative_path
        .with_extension("")
        .to_string_lossy()
        .replace('\\', "/")
}

impl TemplateEngine for HandlebarsEngine {
    fn page_suffix(&self) -> &str {
        HANDLEBARS_PAGE_SUFFIX
    }

    fn render(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        let template = fs::read_to_string(path).map_err(|e| RenderError::new(e.to_string()))?;
        self.registry
            .render_template(&template, context)
            .map_err(|e| RenderError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn context(value: Value) -> RenderContext {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn partial_name_strips_extension() {
        assert_eq!(partial_name(Path::new("header.hbs")), "header");
        assert_eq!(
            partial_name(Path::new("partials/nav/menu.hbs")),
            "partials/nav/menu"
        );
    }

    #[test]
    fn renders_page_with_context() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.page.hbs", "<h1>{{title}}</h1>");

        let engine = HandlebarsEngine::new(tmp.path()).unwrap();
        let html = engine
            .render(
                &tmp.path().join("index.page.hbs"),
                &context(json!({"title": "Home"})),
            )
            .unwrap();
        assert_eq!(html, "<h1>Home</h1>");
    }

    #[test]
    fn renders_partials_from_source_tree() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "partials/header.hbs", "<header>{{site}}</header>");
        write_file(tmp.path(), "index.page.hbs", "{{> partials/header}}<main></main>");

        let engine = HandlebarsEngine::new(tmp.path()).unwrap();
        let html = engine
            .render(
                &tmp.path().join("index.page.hbs"),
                &context(json!({"site": "Example"})),
            )
            .unwrap();
        assert_eq!(html, "<header>Example</header><main></main>");
    }

    #[test]
    fn pages_are_not_registered_as_partials() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "other.page.hbs", "other");
        write_file(tmp.path(), "index.page.hbs", "{{> other.page}}");

        let engine = HandlebarsEngine::new(tmp.path()).unwrap();
        let result = engine.render(&tmp.path().join("index.page.hbs"), &RenderContext::new());
        assert!(result.is_err());
    }

    #[test]
    fn escapes_html_in_values() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.page.hbs", "<p>{{text}}</p>");

        let engine = HandlebarsEngine::new(tmp.path()).unwrap();
        let html = engine
            .render(
                &tmp.path().join("index.page.hbs"),
                &context(json!({"text": "<script>"})),
            )
            .unwrap();
        assert_eq!(html, "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn template_syntax_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "broken.page.hbs", "{{#if}}unclosed");

        let engine = HandlebarsEngine::new(tmp.path()).unwrap();
        let err = engine
            .render(&tmp.path().join("broken.page.hbs"), &RenderContext::new())
            .unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn broken_partial_fails_engine_construction() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "partials/bad.hbs", "{{#each items}}");

        let err = HandlebarsEngine::new(tmp.path()).err().unwrap();
        assert_eq!(err.path, tmp.path().join("partials/bad.hbs"));
        assert_eq!(err.source_root, tmp.path());
        let message = err.to_string();
        assert!(message.contains("partials/bad.hbs"), "{message}");
        assert!(
            message.contains(&format!(
                "base directory (source directory): [{}]",
                tmp.path().display()
            )),
            "{message}"
        );
    }

    #[test]
    fn missing_source_root_has_no_partials() {
        let tmp = TempDir::new().unwrap();
        assert!(HandlebarsEngine::new(&tmp.path().join("missing")).is_ok());
    }
}
