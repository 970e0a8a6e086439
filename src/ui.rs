// User-interaction seam
//
// The orchestrator never talks to the user directly; it goes through this
// trait. DialogUi is the desktop implementation over the dialog crate.

use dialog::{Choice, DialogBox};

pub trait SyncUi {
    /// Ask a yes/no question. Declining aborts the operation silently.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Collect a sync code from the user. None or an empty string means
    /// the user backed out.
    fn prompt_code(&self) -> Option<String>;

    /// Show an informational message (success, generated code).
    fn notify(&self, title: &str, message: &str);

    /// Show a failure message.
    fn report_error(&self, message: &str);
}

/// Desktop dialogs via the system dialog backend.
pub struct DialogUi;

impl SyncUi for DialogUi {
    fn confirm(&self, title: &str, message: &str) -> bool {
        matches!(
            dialog::Question::new(message).title(title).show(),
            Ok(Choice::Yes)
        )
    }

    fn prompt_code(&self) -> Option<String> {
        match dialog::Input::new("Enter the sync ID (like ABC12-DE345):")
            .title("Download synced saves")
            .show()
        {
            Ok(Some(input)) if !input.trim().is_empty() => Some(input),
            _ => None,
        }
    }

    fn notify(&self, title: &str, message: &str) {
        let _ = dialog::Message::new(message).title(title).show();
    }

    fn report_error(&self, message: &str) {
        let _ = dialog::Message::new(message).title("Sync error").show();
    }
}
