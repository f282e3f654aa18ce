//! One complete build run.
//!
//! ```text
//! 1. Setup     create missing source/static/target directories
//! 2. Pages     src/**/*<suffix>  →  target/**/*.html
//! 3. Static    static/**         →  target/**
//! 4. Prune     delete target files not produced in 2–3 (opt-in)
//! ```
//!
//! Every step funnels its writes through one [`WriteTracker`] owned by the
//! run. Any error aborts the whole run: there is no partial-success mode and
//! nothing is retried. Pruning comes last because it needs the complete set
//! of outputs.

use crate::assets::copy_static_content;
use crate::config::{ConfigError, Project};
use crate::engine::TemplateEngine;
use crate::pages::{PageError, PageRenderer};
use crate::pretty::Formatter;
use crate::prune::{PruneError, PruneReport, prune};
use crate::tracker::WriteTracker;
use crate::writer::{OutputWriter, Produced, WriteError, WriteOutcome};
use log::info;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Prune(#[from] PruneError),
}

/// Everything one run did, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Configured directories that didn't exist and were created.
    pub created_directories: Vec<PathBuf>,
    pub pages: Vec<Produced>,
    pub static_files: Vec<Produced>,
    /// `None` when pruning is disabled.
    pub pruned: Option<PruneReport>,
}

impl BuildReport {
    /// Outputs that already existed and were left untouched.
    pub fn kept(&self) -> impl Iterator<Item = &Produced> {
        self.pages
            .iter()
            .chain(&self.static_files)
            .filter(|p| p.outcome == WriteOutcome::Kept)
    }
}

/// Create the source, static and target directories if they are missing.
pub fn ensure_directories(project: &Project) -> Result<Vec<PathBuf>, BuildError> {
    let mut created = Vec::new();
    for dir in [
        project.source_dir(),
        project.static_dir(),
        project.target_dir(),
    ] {
        if dir.is_dir() {
            continue;
        }
        info!("Directory [{}] not found, creating it.", dir.display());
        fs::create_dir_all(&dir).map_err(|source| BuildError::Io {
            path: dir.clone(),
            source,
        })?;
        created.push(dir);
    }
    Ok(created)
}

/// Run the whole pipeline for `project`.
pub fn build(
    project: &Project,
    engine: &dyn TemplateEngine,
    formatter: &dyn Formatter,
) -> Result<BuildReport, BuildError> {
    let created_directories = ensure_directories(project)?;

    let source_root = project.source_dir();
    let static_root = project.static_dir();
    let target_root = project.target_dir();

    let mut tracker = WriteTracker::new();
    let mut writer = OutputWriter::new(&mut tracker, project.configuration.overwrite_silently);

    let renderer = PageRenderer {
        engine,
        formatter,
        globals: &project.globals,
        source_root: &source_root,
        target_root: &target_root,
    };
    let pages = renderer.generate(&mut writer)?;
    let static_files = copy_static_content(&static_root, &target_root, &mut writer)?;
    drop(writer);

    let pruned = if project.configuration.delete_non_generated_files {
        Some(prune(&target_root, &tracker)?)
    } else {
        None
    };

    Ok(BuildReport {
        created_directories,
        pages,
        static_files,
        pruned,
    })
}
