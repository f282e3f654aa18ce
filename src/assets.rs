//! Static content mirroring.
//!
//! Everything under the static directory is copied as-is into the target tree
//! at the same relative location: `static/img/logo.png` → `target/img/logo.png`.
//! Copies go through the same [`OutputWriter`] as pages, so a static file and
//! a page that map to the same output abort the run.

use crate::pipeline::BuildError;
use crate::walk::walk;
use crate::writer::{OutputWriter, Produced};
use std::path::Path;

pub fn copy_static_content(
    static_root: &Path,
    target_root: &Path,
    writer: &mut OutputWriter<'_>,
) -> Result<Vec<Produced>, BuildError> {
    let mut produced = Vec::new();
    for record in walk(static_root) {
        let record = record?;
        let output = target_root.join(&record.relative_path);
        let outcome = writer.copy(&record.path, &output)?;
        produced.push(Produced {
            source: record.path,
            output,
            outcome,
        });
    }
    Ok(produced)
}
