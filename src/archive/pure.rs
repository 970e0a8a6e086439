// Pure archive planning - slot selection, entry naming, name safety
// No side effects, only computation over enumerated slot metadata

use crate::store::SaveSlot;

/// Hard cap on total bytes packed into one sync archive (10 MiB)
pub const ARCHIVE_SIZE_CEILING: u64 = 10 * 1024 * 1024;

/// Archive entry name for the persistent-settings blob
pub const PERSISTENT_ENTRY: &str = "_persistent.save";

/// Suffix tagging restored save entries so the host can tell synced
/// saves apart from local ones
pub const SAVE_ENTRY_SUFFIX: &str = "-LT1.save";

/// Slots with this prefix are engine-internal and never synced
pub const RESERVED_PREFIX: &str = "_";

/// Autosave slots are churn, not progress the user chose to keep
pub const AUTOSAVE_PREFIX: &str = "autosave";

/// Quick-save slots rotate; only the primary one is worth syncing
pub const QUICKSAVE_PREFIX: &str = "quicksave";

/// The one quick-save slot that does get synced
pub const PRIMARY_QUICKSAVE: &str = "quicksave0";

/// Decide whether a slot participates in sync.
pub fn slot_is_syncable(name: &str) -> bool {
    if name.starts_with(RESERVED_PREFIX) {
        return false;
    }
    if name.starts_with(AUTOSAVE_PREFIX) {
        return false;
    }
    if name.starts_with(QUICKSAVE_PREFIX) && name != PRIMARY_QUICKSAVE {
        return false;
    }
    true
}

/// Filter out non-syncable slots and order the rest newest-first.
///
/// The builder adds entries in this order until the size ceiling would be
/// exceeded, so the most recent progress always wins the budget.
pub fn select_slots(slots: &[SaveSlot]) -> Vec<SaveSlot> {
    let mut selected: Vec<SaveSlot> = slots
        .iter()
        .filter(|s| slot_is_syncable(&s.name))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.modified.cmp(&a.modified));
    selected
}

/// Archive entry name for a save slot.
pub fn entry_name_for_slot(slot_name: &str) -> String {
    format!("{}{}", slot_name, SAVE_ENTRY_SUFFIX)
}

/// Reject entry names that could escape the restore directory.
///
/// Entries are written with their name joined onto the destination, so any
/// separator or parent reference is a traversal attempt.
pub fn entry_is_safe(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
}
