//! Stale output removal.
//!
//! Runs after pages and static content are done, when the [`WriteTracker`]
//! holds every path this run wrote. Walks the target tree depth-first:
//! unclaimed regular files are deleted, and each directory is removed after
//! its children are processed if nothing is left in it.
//!
//! ```text
//! target/                   claimed: index.html
//! ├── index.html            stays
//! ├── old.html              deleted
//! └── drafts/
//!     └── wip.html          deleted, then drafts/ removed
//! ```
//!
//! The target root itself always stays. Symlinks are neither followed nor
//! deleted.

use crate::tracker::WriteTracker;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("IO error while pruning {path}: {source}")]
pub struct PruneError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PruneError + '_ {
    move |source| PruneError {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub deleted_files: Vec<PathBuf>,
    pub removed_directories: Vec<PathBuf>,
}

/// Delete everything under `target_root` the tracker doesn't know about.
pub fn prune(target_root: &Path, tracker: &WriteTracker) -> Result<PruneReport, PruneError> {
    let mut report = PruneReport::default();
    prune_directory(target_root, tracker, &mut report)?;
    Ok(report)
}

fn prune_directory(
    dir: &Path,
    tracker: &WriteTracker,
    report: &mut PruneReport,
) -> Result<(), PruneError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(dir))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_error(&path))?;

        if file_type.is_file() {
            if !tracker.contains(&path) {
                fs::remove_file(&path).map_err(io_error(&path))?;
                debug!("Deleted {}", path.display());
                report.deleted_files.push(path);
            }
        } else if file_type.is_dir() {
            prune_directory(&path, tracker, report)?;
            let is_empty = fs::read_dir(&path)
                .map_err(io_error(&path))?
                .next()
                .is_none();
            if is_empty {
                fs::remove_dir(&path).map_err(io_error(&path))?;
                debug!("Removed empty directory {}", path.display());
                report.removed_directories.push(path);
            }
        }
    }
    Ok(())
}
