//! Console summary of a build run.
//!
//! Paths are shown relative to the directory they belong to: page sources to
//! the source root, outputs to the target root.
//!
//! ```text
//! Pages
//! 001 index.page.hbs → index.html
//! 002 blog/post.page.hbs → blog/post.html (kept existing)
//!
//! Static
//! 001 img/logo.png → img/logo.png
//!
//! Pruned
//!     old.html
//!     drafts/
//!
//! Built 2 pages, 1 static file (1 kept), pruned 1 file and 1 directory
//! ```
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability; [`print_build_report`] writes them to stdout.

use crate::config::Project;
use crate::pipeline::BuildReport;
use crate::prune::PruneReport;
use crate::writer::{Produced, WriteOutcome};
use std::path::Path;

/// Prefix for lines nested under a section heading.
const NESTED: &str = "    ";

/// `7` → `007`: keeps the arrows of a long listing aligned.
fn entry_number(n: usize) -> String {
    format!("{n:03}")
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One line per produced output.
///
/// ```text
/// 001 about.page.hbs → about.html
/// 002 img/logo.png → img/logo.png (kept existing)
/// ```
pub fn format_produced(items: &[Produced], source_root: &Path, target_root: &Path) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let line = format!(
                "{} {} → {}",
                entry_number(i + 1),
                relative(&item.source, source_root),
                relative(&item.output, target_root)
            );
            match item.outcome {
                WriteOutcome::Written => line,
                WriteOutcome::Kept => format!("{line} (kept existing)"),
            }
        })
        .collect()
}

/// Deleted files and removed directories, relative to the target root.
pub fn format_pruned(pruned: &PruneReport, target_root: &Path) -> Vec<String> {
    let files = pruned
        .deleted_files
        .iter()
        .map(|p| format!("{NESTED}{}", relative(p, target_root)));
    let dirs = pruned
        .removed_directories
        .iter()
        .map(|p| format!("{NESTED}{}/", relative(p, target_root)));
    files.chain(dirs).collect()
}

pub fn format_summary(report: &BuildReport) -> String {
    let mut summary = format!(
        "Built {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.static_files.len(), "static file", "static files"),
    );
    let kept = report.kept().count();
    if kept > 0 {
        summary.push_str(&format!(" ({kept} kept)"));
    }
    if let Some(pruned) = &report.pruned {
        summary.push_str(&format!(
            ", pruned {} and {}",
            plural(pruned.deleted_files.len(), "file", "files"),
            plural(pruned.removed_directories.len(), "directory", "directories"),
        ));
    }
    summary
}

pub fn format_build_report(report: &BuildReport, project: &Project) -> Vec<String> {
    let source_root = project.source_dir();
    let static_root = project.static_dir();
    let target_root = project.target_dir();
    let mut lines = Vec::new();

    for dir in &report.created_directories {
        lines.push(format!("Created {}/", relative(dir, &project.root)));
    }
    if !report.created_directories.is_empty() {
        lines.push(String::new());
    }

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        lines.extend(format_produced(&report.pages, &source_root, &target_root));
        lines.push(String::new());
    }

    if !report.static_files.is_empty() {
        lines.push("Static".to_string());
        lines.extend(format_produced(
            &report.static_files,
            &static_root,
            &target_root,
        ));
        lines.push(String::new());
    }

    if let Some(pruned) = report
        .pruned
        .as_ref()
        .filter(|p| !p.deleted_files.is_empty() || !p.removed_directories.is_empty())
    {
        lines.push("Pruned".to_string());
        lines.extend(format_pruned(pruned, &target_root));
        lines.push(String::new());
    }

    lines.push(format_summary(report));
    lines
}

pub fn print_build_report(report: &BuildReport, project: &Project) {
    for line in format_build_report(report, project) {
        println!("{}", line);
    }
}
