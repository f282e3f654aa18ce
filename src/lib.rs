//! # Pagewright
//!
//! A small static site build pipeline. Page templates under the source
//! directory are rendered to HTML, static files are mirrored next to them, and
//! output the run no longer produces can optionally be pruned.
//!
//! # Architecture
//!
//! ```text
//! configuration.json, globals.json
//!          │
//!          ▼
//! src/**/*.page.hbs ──render──format──┐
//!                                     ├──▶ OutputWriter ──▶ target/
//! static/** ──────────copy────────────┘        │
//!                                         WriteTracker ──▶ prune target/
//! ```
//!
//! A run is a single synchronous pass. Every output path is claimed with the
//! run's [`tracker::WriteTracker`] right before it is written, so two inputs
//! mapping to the same output abort the build instead of silently replacing
//! each other. Any error aborts the whole run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `configuration.json` / `globals.json` loading with default creation |
//! | [`walk`] | Lazy depth-first file enumeration with relative path context |
//! | [`context`] | Render context layering: globals, sidecar data, page metadata |
//! | [`engine`] | Template engine trait and the Handlebars implementation |
//! | [`pretty`] | Formatter trait and the indenting HTML formatter |
//! | [`pages`] | Page source → formatted HTML → output path |
//! | [`assets`] | Static content mirroring |
//! | [`tracker`] | Run-scoped set of claimed output paths, duplicate detection |
//! | [`writer`] | Parent directory creation and the overwrite policy |
//! | [`prune`] | Stale file and empty directory removal |
//! | [`pipeline`] | One complete run, producing a [`pipeline::BuildReport`] |
//! | [`output`] | Console summary of a run |
//!
//! # Overwrite Policy
//!
//! With `overwrite_silently` off, an output that already exists is kept as-is
//! and a warning is logged. The run continues, but the kept file was not
//! written by this run: it is not claimed, and with pruning enabled it is
//! deleted as stale. Pruned builds therefore want `overwrite_silently` on.

pub mod assets;
pub mod config;
pub mod context;
pub mod engine;
pub mod output;
pub mod pages;
pub mod pipeline;
pub mod pretty;
pub mod prune;
pub mod tracker;
pub mod walk;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
