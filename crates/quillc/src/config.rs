//! Configuration loading for the `quillc` CLI.

use std::path::{Path, PathBuf};

use quill_repl::ReplConfig;
use serde::{Deserialize, Serialize};

use crate::error::{QuillCliError, Result};

pub const CONFIG_FILE_NAME: &str = "quill.toml";

/// Top-level CLI configuration. Currently just wraps the REPL's settings,
/// but kept as its own struct so CLI-only settings have somewhere to go
/// without disturbing `ReplConfig`'s own (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    pub repl: ReplConfig,
}

impl CliConfig {
    /// Load configuration, searching in order: an explicit `path` if one
    /// was given, then `quill.toml` in the current directory, then
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => match Self::find_in_current_dir() {
                Some(path) => Self::load_from_path(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuillCliError::Config(format!("could not read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| QuillCliError::Config(format!("could not parse {}: {e}", path.display())))
    }

    fn find_in_current_dir() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }
}
