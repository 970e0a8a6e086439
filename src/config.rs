// Sync configuration
//
// Everything tunable by the host lives here and is passed to the
// Synchronizer explicitly - no process-wide mutable state. Protocol
// constants (size ceiling, timeout, hash rounds) are fixed in their
// modules because changing them breaks interoperability.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_server_url() -> String {
    "https://sync.crossave.net".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    /// Master switch - when off, upload and download are no-ops
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL of the remote sync store
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Directory the save store reads from and restores into
    #[serde(default)]
    pub save_root: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            enabled: true,
            server_url: default_server_url(),
            save_root: PathBuf::new(),
        }
    }
}

/// Load config from a JSON file, falling back to defaults if the file is
/// missing or unreadable.
pub fn load_cfg(path: &Path) -> SyncConfig {
    if let Ok(file) = File::open(path) {
        if let Ok(config) = serde_json::from_reader::<_, SyncConfig>(BufReader::new(file)) {
            return config;
        }
    }

    SyncConfig::default()
}

pub fn save_cfg(path: &Path, config: &SyncConfig) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
