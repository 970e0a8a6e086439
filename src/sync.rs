// Sync orchestration
//
// The two top-level operations. Upload: flush and pack the saves, mint a
// fresh code, derive credentials, encrypt, push to the remote store, show
// the code. Download: collect a code, derive credentials, pull, decrypt,
// unpack into the restore directory, rescan. Every failure along either
// path is absorbed here and reported through the UI surface - the host
// process never sees a raw error.
//
// Callers are responsible for serializing operations (a UI busy flag);
// one call owns its buffers exclusively for its duration.

use crate::archive::{ARCHIVE_SIZE_CEILING, build_archive, extract_archive};
use crate::code::{generate_code, normalize_code, validate_code};
use crate::config::SyncConfig;
use crate::crypto::{open, seal};
use crate::error::{Result, SyncError};
use crate::keys::derive_credentials;
use crate::store::SaveStore;
use crate::transport::{Transport, download_blob, upload_blob};
use crate::ui::SyncUi;

pub struct Synchronizer {
    config: SyncConfig,
    transport: Box<dyn Transport>,
}

impl Synchronizer {
    pub fn new(config: SyncConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Upload the current saves under a freshly generated sync code.
    ///
    /// Returns the code on success so hosts can offer copy-to-clipboard;
    /// the code is also shown through the UI.
    pub fn upload(&self, store: &mut dyn SaveStore, ui: &dyn SyncUi) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        if !ui.confirm(
            "Upload saves",
            "Upload your saves to the sync server? Anyone with the generated ID can download them for the next hour.",
        ) {
            return None;
        }

        match self.upload_inner(store) {
            Ok(code) => {
                println!("[crossave] Upload complete, sync ID {}", code);
                ui.notify(
                    "Saves uploaded",
                    &format!(
                        "Your saves were uploaded.\n\nSync ID: {}\n\nEnter this ID on the other device within one hour.",
                        code
                    ),
                );
                Some(code)
            }
            Err(e) => {
                eprintln!("[crossave] Upload failed: {}", e);
                ui.report_error(&e.to_string());
                None
            }
        }
    }

    fn upload_inner(&self, store: &mut dyn SaveStore) -> Result<String> {
        // Capture the latest persistent state before packing
        store.flush_persistent()?;

        let archive = build_archive(store, ARCHIVE_SIZE_CEILING)?;
        println!("[crossave] Packed {} bytes of save data", archive.len());

        let code = generate_code();
        let creds = derive_credentials(&code);
        let blob = seal(&archive, &creds.key)?;

        upload_blob(
            self.transport.as_ref(),
            &self.config.server_url,
            &creds.lookup_hash,
            &blob,
        )?;

        Ok(code)
    }

    /// Prompt for a sync code and restore the saves uploaded under it.
    ///
    /// Returns true iff saves were restored. An empty or cancelled prompt
    /// aborts silently.
    pub fn download(&self, store: &mut dyn SaveStore, ui: &dyn SyncUi) -> bool {
        if !self.config.enabled {
            return false;
        }

        let Some(input) = ui.prompt_code() else {
            return false;
        };
        if input.trim().is_empty() {
            return false;
        }

        let code = normalize_code(&input);
        if !validate_code(&code) {
            ui.report_error(&SyncError::Format.to_string());
            return false;
        }

        match self.download_inner(store, &code) {
            Ok(()) => {
                println!("[crossave] Download complete for sync ID {}", code);
                ui.notify("Saves downloaded", "The synced saves were restored.");
                true
            }
            Err(e) => {
                eprintln!("[crossave] Download failed: {}", e);
                ui.report_error(&e.to_string());
                false
            }
        }
    }

    fn download_inner(&self, store: &mut dyn SaveStore, code: &str) -> Result<()> {
        let creds = derive_credentials(code);

        let blob = download_blob(
            self.transport.as_ref(),
            &self.config.server_url,
            &creds.lookup_hash,
        )?;

        let archive = open(&blob, &creds.key)?;
        extract_archive(&archive, &store.restore_dir())?;

        // Newly restored files must become visible to the host
        store.rescan()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FsSaveStore, write_slot};
    use crate::transport::TransportResponse;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;

    /// Remote store in a HashMap, keyed by full URL
    #[derive(Default)]
    struct MemoryTransport {
        blobs: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Transport for MemoryTransport {
        fn put(&self, url: &str, body: &[u8]) -> Result<TransportResponse> {
            self.blobs
                .borrow_mut()
                .insert(url.to_string(), body.to_vec());
            Ok(TransportResponse {
                status: 200,
                body: Vec::new(),
            })
        }

        fn get(&self, url: &str) -> Result<TransportResponse> {
            match self.blobs.borrow().get(url) {
                Some(blob) => Ok(TransportResponse {
                    status: 200,
                    body: blob.clone(),
                }),
                None => Ok(TransportResponse {
                    status: 404,
                    body: b"not found".to_vec(),
                }),
            }
        }
    }

    /// UI with canned answers, recording everything shown to the user
    struct ScriptedUi {
        confirm_answer: bool,
        code_input: Option<String>,
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl ScriptedUi {
        fn new(confirm_answer: bool, code_input: Option<&str>) -> Self {
            Self {
                confirm_answer,
                code_input: code_input.map(String::from),
                messages: RefCell::new(Vec::new()),
                errors: RefCell::new(Vec::new()),
            }
        }
    }

    impl SyncUi for ScriptedUi {
        fn confirm(&self, _title: &str, _message: &str) -> bool {
            self.confirm_answer
        }

        fn prompt_code(&self) -> Option<String> {
            self.code_input.clone()
        }

        fn notify(&self, _title: &str, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }

        fn report_error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn synchronizer(server_url: &str) -> Synchronizer {
        let config = SyncConfig {
            enabled: true,
            server_url: server_url.to_string(),
            save_root: Default::default(),
        };
        Synchronizer::new(config, Box::new(MemoryTransport::default()))
    }

    #[test]
    fn test_upload_then_download_roundtrip() {
        let sync = synchronizer("http://testserver");

        // Two saves totalling ~50 KB plus a persistent blob
        let upload_dir = tempfile::tempdir().unwrap();
        let save_a = vec![0xAAu8; 30 * 1024];
        let save_b = vec![0xBBu8; 20 * 1024];
        write_slot(upload_dir.path(), "slot1", &save_a).unwrap();
        write_slot(upload_dir.path(), "slot2", &save_b).unwrap();
        fs::write(upload_dir.path().join("_persistent.save"), b"settings").unwrap();

        let mut store = FsSaveStore::new(upload_dir.path());
        let ui = ScriptedUi::new(true, None);
        let code = sync.upload(&mut store, &ui).expect("upload should succeed");
        assert!(ui.errors.borrow().is_empty());
        assert!(ui.messages.borrow()[0].contains(&code));

        // Restore on a "different device", entering the code in lowercase
        let download_dir = tempfile::tempdir().unwrap();
        let mut other_store = FsSaveStore::new(download_dir.path());
        let lowercase_code = code.to_lowercase();
        let ui = ScriptedUi::new(true, Some(&lowercase_code));
        assert!(sync.download(&mut other_store, &ui));
        assert!(ui.errors.borrow().is_empty());

        assert_eq!(
            fs::read(download_dir.path().join("slot1-LT1.save")).unwrap(),
            save_a
        );
        assert_eq!(
            fs::read(download_dir.path().join("slot2-LT1.save")).unwrap(),
            save_b
        );
        assert_eq!(
            fs::read(download_dir.path().join("_persistent.save")).unwrap(),
            b"settings"
        );
    }

    #[test]
    fn test_disabled_sync_is_noop() {
        let config = SyncConfig {
            enabled: false,
            ..SyncConfig::default()
        };
        let sync = Synchronizer::new(config, Box::new(MemoryTransport::default()));

        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());

        let ui = ScriptedUi::new(true, Some("ABCDE-12345"));
        assert!(sync.upload(&mut store, &ui).is_none());
        assert!(!sync.download(&mut store, &ui));
        assert!(ui.messages.borrow().is_empty());
        assert!(ui.errors.borrow().is_empty());
    }

    #[test]
    fn test_declined_confirmation_aborts_silently() {
        let sync = synchronizer("http://testserver");
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());

        let ui = ScriptedUi::new(false, None);
        assert!(sync.upload(&mut store, &ui).is_none());
        assert!(ui.messages.borrow().is_empty());
        assert!(ui.errors.borrow().is_empty());
    }

    #[test]
    fn test_empty_code_input_aborts_silently() {
        let sync = synchronizer("http://testserver");
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());

        for input in [None, Some(""), Some("   ")] {
            let ui = ScriptedUi::new(true, input);
            assert!(!sync.download(&mut store, &ui));
            assert!(ui.messages.borrow().is_empty());
            assert!(ui.errors.borrow().is_empty());
        }
    }

    #[test]
    fn test_malformed_code_reports_format_error() {
        let sync = synchronizer("http://testserver");
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());

        let ui = ScriptedUi::new(true, Some("ABCDEF12345"));
        assert!(!sync.download(&mut store, &ui));
        assert_eq!(ui.errors.borrow().len(), 1);
        assert!(ui.errors.borrow()[0].contains("not valid"));
    }

    #[test]
    fn test_unknown_code_reports_not_found() {
        let sync = synchronizer("http://testserver");
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());

        let ui = ScriptedUi::new(true, Some("ABCDE-12345"));
        assert!(!sync.download(&mut store, &ui));
        assert_eq!(ui.errors.borrow().len(), 1);
        assert!(ui.errors.borrow()[0].contains("No copy of this sync"));
    }

    #[test]
    fn test_corrupted_blob_reports_decryption_error() {
        let transport = MemoryTransport::default();
        let creds = derive_credentials("ABCDE-12345");
        transport.blobs.borrow_mut().insert(
            format!("http://testserver/api/sync/v1/{}", creds.lookup_hash),
            vec![0u8; 64],
        );

        let config = SyncConfig {
            enabled: true,
            server_url: "http://testserver".to_string(),
            save_root: Default::default(),
        };
        let sync = Synchronizer::new(config, Box::new(transport));

        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSaveStore::new(dir.path());
        let ui = ScriptedUi::new(true, Some("ABCDE-12345"));
        assert!(!sync.download(&mut store, &ui));
        assert!(ui.errors.borrow()[0].contains("could not be decrypted"));
    }
}
