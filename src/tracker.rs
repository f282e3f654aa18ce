//! Run-scoped record of every output path claimed by the pipeline.
//!
//! Each page and each static file maps to exactly one output path. If two
//! inputs map to the same path (`about.page.hbs` and a static `about.html`,
//! say) the second claim fails: one of them would silently replace the other.
//!
//! Only paths that are actually written get claimed; an existing file the run
//! declines to overwrite does not. After pages and static content are done,
//! the claimed set is exactly the set of files the run wrote, which is what
//! [`prune`](crate::prune::prune) keeps.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Attempting to write output file twice: [{}]", .0.display())]
pub struct DuplicateWrite(pub PathBuf);

#[derive(Debug, Default)]
pub struct WriteTracker {
    claimed: BTreeSet<PathBuf>,
}

impl WriteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `path` for this run. Fails if it was already claimed.
    pub fn claim(&mut self, path: &Path) -> Result<(), DuplicateWrite> {
        if !self.claimed.insert(path.to_path_buf()) {
            return Err(DuplicateWrite(path.to_path_buf()));
        }
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.claimed.contains(path)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.claimed.iter().map(PathBuf::as_path)
    }
}
