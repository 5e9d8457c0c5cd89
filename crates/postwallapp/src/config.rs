//! # Configuration
//!
//! Configuration is managed by [`confique`], which layers values from
//! environment variables over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Command-line flags** (applied by the binary after loading)
//! 2. **Environment variables**: `POSTWALL_BIND`, `POSTWALL_DATA`, ...
//! 3. **Config file**: `postwall.toml` in the OS config directory
//!    (via the `directories` crate)
//! 4. **Compiled defaults**: `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `bind` | `POSTWALL_BIND` | `127.0.0.1:4000` | Address the HTTP server listens on |
//! | `backend` | `POSTWALL_BACKEND` | `fs` | `fs` (durable) or `memory` |
//! | `data_dir` | `POSTWALL_DATA` | OS data dir | Where the `fs` backend keeps posts |
//! | `cors_origin` | `POSTWALL_CORS_ORIGIN` | `http://localhost:5173` | Browser origin allowed by CORS |
//! | `seed_default_post` | `POSTWALL_SEED` | `true` | Add a welcome post to an empty wall at startup |

use crate::error::{Result, WallError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = "postwall.toml";

/// Which key-value backend the post store runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Fs,
}

impl FromStr for BackendKind {
    type Err = WallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "fs" | "file" | "disk" => Ok(BackendKind::Fs),
            other => Err(WallError::Config(format!(
                "unknown backend '{}' (expected 'fs' or 'memory')",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Fs => write!(f, "fs"),
        }
    }
}

/// Configuration for postwall, stored in `postwall.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostwallConfig {
    /// Address the HTTP server binds to
    #[config(env = "POSTWALL_BIND", default = "127.0.0.1:4000")]
    pub bind: String,

    /// Storage backend: "fs" or "memory"
    #[config(env = "POSTWALL_BACKEND", default = "fs")]
    pub backend: String,

    /// Data directory for the fs backend. When absent, the OS data dir is used.
    #[config(env = "POSTWALL_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Origin allowed to call the API from a browser
    #[config(env = "POSTWALL_CORS_ORIGIN", default = "http://localhost:5173")]
    pub cors_origin: String,

    /// Create the welcome post when the wall is empty at startup
    #[config(env = "POSTWALL_SEED", default = true)]
    pub seed_default_post: bool,
}

impl Default for PostwallConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            backend: "fs".to_string(),
            data_dir: None,
            cors_origin: "http://localhost:5173".to_string(),
            seed_default_post: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "postwall", "postwall")
}

impl PostwallConfig {
    /// Loads environment overrides on top of `config_file` (if it exists).
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = config_file {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| WallError::Config(e.to_string()))
    }

    /// Loads a config file without looking at the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| WallError::Config(e.to_string()))
    }

    /// `postwall.toml` in the OS config directory.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.backend.parse()
    }

    /// The configured data directory, falling back to the OS data dir.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| WallError::Config("could not determine a data directory".to_string()))
    }
}
