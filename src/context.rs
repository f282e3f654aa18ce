//! Render context assembly.
//!
//! A page's context is built from three layers; on key collision the later
//! layer wins:
//!
//! 1. **Globals** from `globals.json`
//! 2. **Sidecar data**: `<page path>.json` next to the page source, optional
//! 3. **Page metadata** injected by the pipeline:
//!
//! | Key             | Example (`src/blog/post.page.hbs`) |
//! |-----------------|------------------------------------|
//! | `basedir`       | `src`                              |
//! | `pageName`      | `post`                             |
//! | `pageDirectory` | `blog`                             |
//! | `pagePath`      | `blog/post`                        |
//! | `pageRootPath`  | `../`                              |
//!
//! Page metadata always wins, so a sidecar can't accidentally rename the page
//! it describes.

use crate::config::Globals;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type RenderContext = Map<String, Value>;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("IO error reading data file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in data file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Data file {0} must contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Positional metadata for one page, all paths `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Source file name without the page suffix.
    pub name: String,
    /// Directory of the page relative to the source root.
    pub directory: String,
    /// `directory/name`, or just `name` at the source root.
    pub path: String,
    /// `../` per nesting level, for links back to the site root.
    pub root_path: String,
}

impl PageInfo {
    pub fn new(name: &str, subdirectory: &Path, root_path: &str) -> Self {
        let directory = slash_path(subdirectory);
        let path = if directory.is_empty() {
            name.to_string()
        } else {
            format!("{directory}/{name}")
        };
        Self {
            name: name.to_string(),
            directory,
            path,
            root_path: root_path.to_string(),
        }
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read a page's sidecar data file, if there is one.
///
/// Only a regular file counts; a directory of the same name is ignored.
pub fn read_sidecar(path: &Path) -> Result<Option<Map<String, Value>>, SidecarError> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|source| SidecarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&raw) {
        Ok(Value::Object(data)) => Ok(Some(data)),
        Ok(_) => Err(SidecarError::NotAnObject(path.to_path_buf())),
        Err(source) => Err(SidecarError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Layer globals, sidecar data and page metadata into one context.
pub fn build_context(
    globals: &Globals,
    sidecar: Option<Map<String, Value>>,
    basedir: &Path,
    page: &PageInfo,
) -> RenderContext {
    let mut context = globals.clone();
    if let Some(data) = sidecar {
        context.extend(data);
    }
    context.insert(
        "basedir".into(),
        Value::String(basedir.to_string_lossy().into_owned()),
    );
    context.insert("pageName".into(), Value::String(page.name.clone()));
    context.insert("pageDirectory".into(), Value::String(page.directory.clone()));
    context.insert("pagePath".into(), Value::String(page.path.clone()));
    context.insert("pageRootPath".into(), Value::String(page.root_path.clone()));
    context
}
