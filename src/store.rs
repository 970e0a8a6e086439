// Save store seam
//
// The host engine owns the save files; this trait is the narrow view the
// sync protocol needs: enumerate slots with modification times, read slot
// bytes, read/flush the persistent-settings blob, and rescan after a
// restore has written new files. FsSaveStore is the plain-directory
// implementation used by desktop hosts and by tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::archive::pure::PERSISTENT_ENTRY;
use crate::error::Result;

/// On-disk extension for save slot files
pub const SAVE_EXTENSION: &str = "save";

/// One enumerated save slot.
#[derive(Debug, Clone)]
pub struct SaveSlot {
    /// Slot name (file stem, no extension)
    pub name: String,
    pub modified: SystemTime,
}

pub trait SaveStore {
    /// Enumerate save slots. Order is unspecified; the archive builder
    /// sorts by modification time itself.
    fn list_slots(&self) -> Result<Vec<SaveSlot>>;

    /// Read the raw bytes of a slot by name.
    fn read_slot(&self, name: &str) -> Result<Vec<u8>>;

    /// Read the persistent-settings blob, if one exists.
    fn read_persistent(&self) -> Option<Vec<u8>>;

    /// Write any in-memory persistent state to storage so an upload
    /// captures the latest copy.
    fn flush_persistent(&mut self) -> Result<()>;

    /// Directory restored archive entries are extracted into.
    fn restore_dir(&self) -> PathBuf;

    /// Make newly restored files visible to the host. Hosts with a
    /// persisted virtual filesystem flush it here.
    fn rescan(&mut self) -> Result<()>;
}

/// Save store over a flat directory of `<name>.save` files.
///
/// The persistent blob lives alongside the slots as `_persistent.save`;
/// its reserved-prefix name keeps it out of slot enumeration.
pub struct FsSaveStore {
    root: PathBuf,
}

impl FsSaveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn persistent_path(&self) -> PathBuf {
        self.root.join(PERSISTENT_ENTRY)
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, SAVE_EXTENSION))
    }
}

impl SaveStore for FsSaveStore {
    fn list_slots(&self) -> Result<Vec<SaveSlot>> {
        let mut slots = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            slots.push(SaveSlot {
                name: stem.to_string(),
                modified,
            });
        }

        Ok(slots)
    }

    fn read_slot(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.slot_path(name))?)
    }

    fn read_persistent(&self) -> Option<Vec<u8>> {
        fs::read(self.persistent_path()).ok()
    }

    fn flush_persistent(&mut self) -> Result<()> {
        // Plain files are already on disk; nothing buffered to flush
        Ok(())
    }

    fn restore_dir(&self) -> PathBuf {
        self.root.clone()
    }

    fn rescan(&mut self) -> Result<()> {
        // Directory is re-read on every list_slots call
        Ok(())
    }
}

/// Helper for hosts and tests: write a slot file under a store root.
pub fn write_slot(root: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(root)?;
    fs::write(root.join(format!("{}.{}", name, SAVE_EXTENSION)), bytes)?;
    Ok(())
}
