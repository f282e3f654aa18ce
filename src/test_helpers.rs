//! Shared test utilities for the pagewright test suite.
//!
//! Provides fixture writers, tree listings, and stand-in collaborators so
//! pipeline tests can run without depending on Handlebars output details.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "src/a/b.page.pug", "");
//! build(&project, &ContextEngine, &PassthroughFormatter).unwrap();
//! assert_eq!(list_files(&tmp.path().join("target")), ["a/b.html"]);
//! ```

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::context::RenderContext;
use crate::engine::{RenderError, TemplateEngine};
use crate::pretty::{FormatError, Formatter};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
}

// =========================================================================
// Tree listings: sorted, `/`-separated, relative to the given root
// =========================================================================

/// All regular files under `root`.
pub fn list_files(root: &Path) -> Vec<String> {
    list(root, |t| t.is_file())
}

/// All directories under `root`, excluding `root` itself.
pub fn list_dirs(root: &Path) -> Vec<String> {
    list(root, |t| t.is_dir())
}

fn list(root: &Path, keep: impl Fn(&fs::FileType) -> bool) -> Vec<String> {
    let mut paths: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| keep(&e.file_type()))
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    paths.sort();
    paths
}

// =========================================================================
// Stand-in collaborators
// =========================================================================

/// Engine for `.page.pug` sources that ignores the template and renders the
/// context it was given as pretty JSON, so tests can inspect it.
pub struct ContextEngine;

impl TemplateEngine for ContextEngine {
    fn page_suffix(&self) -> &str {
        ".page.pug"
    }

    fn render(&self, _path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        serde_json::to_string_pretty(context).map_err(|e| RenderError::new(e.to_string()))
    }
}

/// Engine whose every render fails.
pub struct FailingEngine;

impl TemplateEngine for FailingEngine {
    fn page_suffix(&self) -> &str {
        ".page.pug"
    }

    fn render(&self, _path: &Path, _context: &RenderContext) -> Result<String, RenderError> {
        Err(RenderError::new("template exploded"))
    }
}

/// Formatter that rejects every input as an unterminated comment.
pub struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _markup: &str) -> Result<String, FormatError> {
        Err(FormatError::Unterminated("comment", 0))
    }
}

/// Formatter that returns markup unchanged.
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, markup: &str) -> Result<String, FormatError> {
        Ok(markup.to_string())
    }
}
