//! Page rendering: page source → formatted HTML.
//!
//! Only files ending in the engine's page suffix are pages. Everything else in
//! the source tree (partials, sidecar data, notes) is left for the engine to
//! pull in as it sees fit.
//!
//! ```text
//! src/blog/post.page.hbs   page source
//! src/blog/post.json       sidecar data (optional)
//!            ↓
//! target/blog/post.html
//! ```

use crate::config::Globals;
use crate::context::{PageInfo, SidecarError, build_context, read_sidecar};
use crate::engine::TemplateEngine;
use crate::pipeline::BuildError;
use crate::pretty::{FormatError, Formatter};
use crate::walk::{FileRecord, walk};
use crate::writer::{OutputWriter, Produced};
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Sidecar(#[from] SidecarError),
    #[error(
        "Error while processing [{}]:\n{message}\nbase directory (source directory): [{}]",
        .path.display(),
        .source_root.display()
    )]
    Render {
        path: PathBuf,
        message: String,
        source_root: PathBuf,
    },
    #[error("Error while formatting output of [{}]: {source}", .path.display())]
    Format { path: PathBuf, source: FormatError },
}

/// A page rendered and formatted, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub markup: String,
}

pub struct PageRenderer<'a> {
    pub engine: &'a dyn TemplateEngine,
    pub formatter: &'a dyn Formatter,
    pub globals: &'a Globals,
    pub source_root: &'a Path,
    pub target_root: &'a Path,
}

impl PageRenderer<'_> {
    /// Page name for a page source, `None` if the file isn't a page.
    pub fn page_name<'r>(&self, record: &'r FileRecord) -> Option<&'r str> {
        record.file_name.strip_suffix(self.engine.page_suffix())
    }

    /// Where a page's HTML lands: same subdirectory, `.html` instead of the suffix.
    pub fn output_path(&self, record: &FileRecord, page_name: &str) -> PathBuf {
        self.target_root
            .join(&record.subdirectory)
            .join(format!("{page_name}.html"))
    }

    fn sidecar_path(&self, record: &FileRecord, page_name: &str) -> PathBuf {
        self.source_root
            .join(&record.subdirectory)
            .join(format!("{page_name}.json"))
    }

    /// Render one file. Returns `Ok(None)` for files that aren't pages.
    pub fn render(&self, record: &FileRecord) -> Result<Option<RenderedPage>, PageError> {
        let Some(page_name) = self.page_name(record) else {
            return Ok(None);
        };

        let info = PageInfo::new(page_name, &record.subdirectory, &record.root_prefix);
        let sidecar = read_sidecar(&self.sidecar_path(record, page_name))?;
        let context = build_context(self.globals, sidecar, self.source_root, &info);

        debug!("Rendering {}", record.path.display());
        let raw = self
            .engine
            .render(&record.path, &context)
            .map_err(|e| PageError::Render {
                path: record.path.clone(),
                message: e.message,
                source_root: self.source_root.to_path_buf(),
            })?;
        let markup = self
            .formatter
            .format(&raw)
            .map_err(|source| PageError::Format {
                path: record.path.clone(),
                source,
            })?;

        Ok(Some(RenderedPage {
            source: record.path.clone(),
            output: self.output_path(record, page_name),
            markup,
        }))
    }

    /// Render every page under the source root and hand it to `writer`.
    ///
    /// Stops at the first failure; pages written before it stay on disk.
    pub fn generate(&self, writer: &mut OutputWriter<'_>) -> Result<Vec<Produced>, BuildError> {
        let mut produced = Vec::new();
        for record in walk(self.source_root) {
            let Some(page) = self.render(&record?)? else {
                continue;
            };
            let outcome = writer.write(&page.output, &page.markup)?;
            produced.push(Produced {
                source: page.source,
                output: page.output,
                outcome,
            });
        }
        Ok(produced)
    }
}
