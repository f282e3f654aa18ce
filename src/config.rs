//! Project configuration and global template variables.
//!
//! Both live as JSON files in the project root (the process working directory
//! when run from the CLI):
//!
//! ```text
//! project/
//! ├── configuration.json     # Build settings (created with defaults if missing)
//! ├── globals.json           # Variables visible to every page (default `{}`)
//! ├── src/                   # Page sources, sidecars, partials
//! ├── static/                # Copied verbatim into the target tree
//! └── target/                # Generated site
//! ```
//!
//! ## Configuration Options
//!
//! ```json
//! {
//!   "source_directory": "src",
//!   "static_content_directory": "static",
//!   "target_directory": "target",
//!   "overwrite_silently": false,
//!   "delete_non_generated_files": false
//! }
//! ```
//!
//! Missing keys take the defaults shown above. Unknown keys are rejected to
//! catch typos early.
//!
//! A missing file is not an error: the default is written to disk and used,
//! so a first run in an empty directory leaves a documented config behind.

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const GLOBALS_FILENAME: &str = "globals.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Build settings loaded from `configuration.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Page sources, sidecar data files and partials.
    pub source_directory: PathBuf,
    /// Files mirrored byte-for-byte into the target tree.
    pub static_content_directory: PathBuf,
    /// Where the generated site is written.
    pub target_directory: PathBuf,
    /// Replace existing output files instead of keeping them.
    pub overwrite_silently: bool,
    /// Delete target files this run did not produce, then empty directories.
    pub delete_non_generated_files: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("src"),
            static_content_directory: PathBuf::from("static"),
            target_directory: PathBuf::from("target"),
            overwrite_silently: false,
            delete_non_generated_files: false,
        }
    }
}

/// Variables merged into every page's render context.
pub type Globals = Map<String, Value>;

/// Everything a run needs to know before touching the source tree.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory the configured paths are resolved against.
    pub root: PathBuf,
    pub configuration: Configuration,
    pub globals: Globals,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, configuration: Configuration, globals: Globals) -> Self {
        Self {
            root: root.into(),
            configuration,
            globals,
        }
    }

    /// Load `configuration.json` and `globals.json` from `root`, creating
    /// either file with its default content if it doesn't exist.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let configuration = load_configuration(root)?;
        let globals = load_globals(root)?;
        Ok(Self::new(root, configuration, globals))
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.configuration.source_directory)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.configuration.static_content_directory)
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root.join(&self.configuration.target_directory)
    }
}

pub fn load_configuration(root: &Path) -> Result<Configuration, ConfigError> {
    read_or_create(&root.join(CONFIGURATION_FILENAME), Configuration::default)
}

/// Load globals. The file must hold a JSON object; anything else is reported
/// as a JSON error on the globals file.
pub fn load_globals(root: &Path) -> Result<Globals, ConfigError> {
    read_or_create(&root.join(GLOBALS_FILENAME), Globals::new)
}

fn read_or_create<T, F>(path: &Path, default: F) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if path.is_file() {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("File [{}] not found, creating it.", path.display());
    let value = default();
    let json = serde_json::to_string_pretty(&value).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(value)
}
