//! Location of rollbook's persisted files.
//!
//! Only the configuration is stored; attendance data is never written to
//! disk outside of explicit exports.

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "openclass";
pub const APP_NAME: &str = "rollbook";

/// Overrides the data directory, mostly for tests and portable installs.
pub const ENV_DATA_DIR: &str = "ROLLBOOK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    /// Resolves the data directory: `ROLLBOOK_DATA_DIR` when set, the
    /// platform application data directory otherwise.
    pub fn new() -> Self {
        if let Some(dir) = var(ENV_DATA_DIR).ok().filter(|dir| !dir.trim().is_empty()) {
            return Self::at(dir);
        }

        let home = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("XDG_DATA_HOME").unwrap_or_else(|_| var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share"),
        };
        Self::at(Path::new(&home).join(VENDOR_NAME).join(APP_NAME))
    }

    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory. The directory is
    /// created on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
