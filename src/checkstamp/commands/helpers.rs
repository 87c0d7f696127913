use crate::config::StampConfig;
use crate::date::{format_date, retroactive_date};
use crate::error::Result;
use crate::model::DocumentId;
use crate::stamp::stamp;
use crate::store::DocumentStore;
use chrono::{DateTime, Local};
use tracing::debug;

/// "1 created date", "3 created dates"
pub fn created_dates(count: usize) -> String {
    if count == 1 {
        "1 created date".to_string()
    } else {
        format!("{} created dates", count)
    }
}

pub fn files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}

/// Read, stamp and (if anything changed) write back one document.
///
/// Returns the number of stamps added. The stamp date comes from the document's own
/// timestamps, so `now` only matters when the store cannot provide them.
pub fn fix_document<S: DocumentStore + ?Sized>(
    store: &S,
    id: &DocumentId,
    config: &StampConfig,
    now: DateTime<Local>,
) -> Result<usize> {
    let text = store.read_text(id)?;
    let meta = store.metadata(id)?;
    let date = format_date(retroactive_date(config, Some(&meta), now));

    let outcome = stamp(&text, &date);
    if outcome.added > 0 {
        store.write_text(id, &outcome.text)?;
    }

    debug!(document = %id, date = %date, added = outcome.added, "processed document");
    Ok(outcome.added)
}
