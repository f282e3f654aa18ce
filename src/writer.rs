//! Output writing with the overwrite policy.
//!
//! Every output goes through the same steps:
//!
//! 1. create the parent directory chain
//! 2. if the file already exists and overwriting is off, keep it and stop
//! 3. claim the path with the [`WriteTracker`] (a duplicate aborts the run)
//! 4. write, fully replacing any previous content
//!
//! An existing file that is not overwritten is *kept*: a warning is logged
//! and the run continues. Kept files are never claimed, so the tracker holds
//! exactly the paths this run wrote and pruning treats kept files as stale.

use crate::tracker::{DuplicateWrite, WriteTracker};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateWrite),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened to one output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Already present and overwriting is disabled.
    Kept,
}

/// One input and the output it was mapped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Produced {
    pub source: PathBuf,
    pub output: PathBuf,
    pub outcome: WriteOutcome,
}

pub struct OutputWriter<'t> {
    tracker: &'t mut WriteTracker,
    overwrite: bool,
}

impl<'t> OutputWriter<'t> {
    pub fn new(tracker: &'t mut WriteTracker, overwrite: bool) -> Self {
        Self { tracker, overwrite }
    }

    /// Write `content` to `output`.
    pub fn write(&mut self, output: &Path, content: &str) -> Result<WriteOutcome, WriteError> {
        if !self.prepare(output)? {
            return Ok(WriteOutcome::Kept);
        }
        fs::write(output, content).map_err(|source| WriteError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        debug!("Wrote {}", output.display());
        Ok(WriteOutcome::Written)
    }

    /// Copy `source` byte-for-byte to `output`.
    pub fn copy(&mut self, source: &Path, output: &Path) -> Result<WriteOutcome, WriteError> {
        if !self.prepare(output)? {
            return Ok(WriteOutcome::Kept);
        }
        fs::copy(source, output).map_err(|e| WriteError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        debug!("Copied {} to {}", source.display(), output.display());
        Ok(WriteOutcome::Written)
    }

    /// Create the parents and claim the path. Returns whether the content
    /// should actually be written; a kept file is left unclaimed.
    fn prepare(&mut self, output: &Path) -> Result<bool, WriteError> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if output.exists() && !self.overwrite {
            warn!("Not overwriting existing file [{}]", output.display());
            return Ok(false);
        }

        self.tracker.claim(output)?;
        Ok(true)
    }
}
