// crossave - encrypted save-data synchronization over short typeable codes
//
// Upload packs the user's saves into an encrypted blob and stores it on a
// remote server under a generated sync ID (like "K3F9A-02XQZ"); download
// restores the blob on another device from nothing but that ID. The ID is
// the only secret: it derives both the encryption key and the public
// storage token through a fixed hash chain, and the server only ever sees
// ciphertext under an opaque hash.
//
// Hosts plug in three collaborators: a SaveStore (where saves live), a
// SyncUi (how the user is asked and told things), and a Transport (how
// bytes reach the server - blocking HTTP, or cooperative polling on
// platforms without blocking I/O).

pub mod archive;
pub mod code;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod store;
pub mod sync;
pub mod transport;
pub mod ui;

pub use config::{SyncConfig, load_cfg, save_cfg};
pub use error::SyncError;
pub use store::{FsSaveStore, SaveSlot, SaveStore};
pub use sync::Synchronizer;
pub use transport::{HttpTransport, PollingTransport, Transport};
pub use ui::{DialogUi, SyncUi};
