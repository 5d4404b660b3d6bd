//! Entry detail.

use crate::entry::EntryId;
use crate::errors::{AppResult, PersistenceError};
use crate::render::render_detail;
use crate::store::EntryStore;
use tracing::info;

/// Fetches one entry and renders every field of it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the store has no entry with `id`,
/// or any error from the store itself.
pub fn show_entry(store: &dyn EntryStore, id: &str) -> AppResult<String> {
    let id = EntryId::from(id.trim());
    info!("Showing entry {}", id);

    match store.get_entry(&id)? {
        Some(entry) => Ok(render_detail(&entry)),
        None => Err(PersistenceError::NotFound(id.to_string()).into()),
    }
}
