//! Depth-first enumeration of the regular files under a directory.
//!
//! Every file is reported together with two pieces of positional context:
//!
//! - **subdirectory**: the directory containing the file, relative to the walk
//!   root (empty for files directly under the root). Output paths are built by
//!   joining this onto the target root.
//! - **root prefix**: one `../` per nesting level. Templates use it to build
//!   relative links from a generated page back to the site root.
//!
//! ```text
//! src/                      subdirectory   root prefix
//! ├── index.page.hbs        ""             ""
//! └── blog/
//!     └── 2024/
//!         └── post.page.hbs "blog/2024"    "../../"
//! ```
//!
//! Symlinks are not followed and are not reported; neither is anything else
//! that isn't a regular file or a directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One regular file found under the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File name, lossily converted for use in templates and page names.
    pub file_name: String,
    /// Full path: walk root joined with `relative_path`.
    pub path: PathBuf,
    /// Directory containing the file, relative to the walk root.
    pub subdirectory: PathBuf,
    /// `subdirectory` joined with the original (non-lossy) file name.
    pub relative_path: PathBuf,
    /// `../` repeated once per nesting level below the walk root.
    pub root_prefix: String,
}

/// Lazy, single-pass iterator over the files under a root directory.
pub struct Walk {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

/// Start walking `root`. Nothing is read until the iterator is advanced.
///
/// Entries are visited in file-name order within each directory so repeated
/// runs report files in the same sequence.
pub fn walk(root: &Path) -> Walk {
    Walk {
        root: root.to_path_buf(),
        entries: WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter(),
    }
}

impl Iterator for Walk {
    type Item = Result<FileRecord, walkdir::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            return Some(Ok(self.record(&entry)));
        }
    }
}

impl Walk {
    fn record(&self, entry: &walkdir::DirEntry) -> FileRecord {
        // walkdir yields root.join(...) paths, so the prefix is always present
        let relative_path = entry
            .path()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
        let subdirectory = relative_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        FileRecord {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            subdirectory,
            relative_path,
            root_prefix: "../".repeat(entry.depth().saturating_sub(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    fn collect(root: &Path) -> Vec<FileRecord> {
        walk(root).collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn top_level_file_has_empty_context() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.page.hbs", "");

        let records = collect(tmp.path());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.file_name, "index.page.hbs");
        assert_eq!(record.path, tmp.path().join("index.page.hbs"));
        assert_eq!(record.subdirectory, PathBuf::new());
        assert_eq!(record.relative_path, PathBuf::from("index.page.hbs"));
        assert_eq!(record.root_prefix, "");
    }

    #[test]
    fn nested_files_carry_one_parent_step_per_level() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/one.txt", "");
        write_file(tmp.path(), "a/b/c/three.txt", "");

        let records = collect(tmp.path());
        let one = records.iter().find(|r| r.file_name == "one.txt").unwrap();
        assert_eq!(one.subdirectory, PathBuf::from("a"));
        assert_eq!(one.root_prefix, "../");

        let three = records.iter().find(|r| r.file_name == "three.txt").unwrap();
        assert_eq!(three.subdirectory, PathBuf::from("a/b/c"));
        assert_eq!(three.relative_path, PathBuf::from("a/b/c/three.txt"));
        assert_eq!(three.root_prefix, "../../../");
        assert_eq!(three.path, tmp.path().join("a/b/c/three.txt"));
    }

    #[test]
    fn directories_are_not_reported() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("empty/deeper")).unwrap();
        write_file(tmp.path(), "full/file.txt", "");

        let names: Vec<String> = collect(tmp.path())
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        assert_eq!(names, ["file.txt"]);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(collect(tmp.path()).is_empty());
    }

    #[test]
    fn missing_root_reports_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut walk = walk(&tmp.path().join("nope"));
        assert!(matches!(walk.next(), Some(Err(_))));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "real/file.txt", "");
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("linked-dir")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("real/file.txt"),
            tmp.path().join("linked-file.txt"),
        )
        .unwrap();

        let paths: Vec<PathBuf> = collect(tmp.path())
            .into_iter()
            .map(|r| r.relative_path)
            .collect();
        assert_eq!(paths, [PathBuf::from("real/file.txt")]);
    }
}
