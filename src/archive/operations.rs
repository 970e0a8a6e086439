// Archive packing and unpacking
//
// The sync archive is a plain uncompressed zip held in memory: the
// persistent blob first, then save slots newest-first until the size
// ceiling is hit. Extraction refuses the whole archive if any entry name
// looks like a traversal attempt, before a single file is written.

use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::pure::{PERSISTENT_ENTRY, entry_is_safe, entry_name_for_slot, select_slots};
use crate::error::{Result, SyncError};
use crate::store::SaveStore;

/// Pack the store's syncable saves into an in-memory archive.
///
/// Slot reads are best-effort: a slot that vanished between enumeration
/// and read is skipped with a warning instead of failing the upload.
/// Succeeds even when no save files exist.
pub fn build_archive(store: &dyn SaveStore, ceiling: u64) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut total: u64 = 0;

    // Persistent blob goes first and counts against the same ceiling
    if let Some(blob) = store.read_persistent() {
        if blob.len() as u64 <= ceiling {
            zip.start_file(PERSISTENT_ENTRY, options)?;
            zip.write_all(&blob)?;
            total += blob.len() as u64;
        } else {
            eprintln!("[crossave] Warning: persistent data exceeds the size ceiling, omitting");
        }
    }

    for slot in select_slots(&store.list_slots()?) {
        let bytes = match store.read_slot(&slot.name) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("[crossave] Warning: could not read save '{}': {}", slot.name, e);
                continue;
            }
        };

        if total + bytes.len() as u64 > ceiling {
            println!(
                "[crossave] Size ceiling reached, omitting '{}' and older saves",
                slot.name
            );
            break;
        }

        zip.start_file(entry_name_for_slot(&slot.name), options)?;
        zip.write_all(&bytes)?;
        total += bytes.len() as u64;
    }

    Ok(zip.finish()?.into_inner())
}

/// Unpack a downloaded archive into the restore directory.
///
/// Entry names are checked up front; one unsafe name rejects the whole
/// restore with no files written. Existing files of the same name are
/// overwritten.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for name in archive.file_names() {
        if !entry_is_safe(name) {
            return Err(SyncError::Security(name.to_string()));
        }
    }

    fs::create_dir_all(dest)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = dest.join(file.name());
        let mut out = File::create(&outpath)?;
        io::copy(&mut file, &mut out)?;
    }

    Ok(())
}
