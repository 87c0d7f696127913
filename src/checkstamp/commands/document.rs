use crate::commands::helpers::{created_dates, fix_document};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::StampConfig;
use crate::error::Result;
use crate::model::DocumentId;
use crate::store::DocumentStore;
use chrono::{DateTime, Local};
use tracing::info;

pub const NOTHING_TO_DO: &str = "No unchecked checkboxes without creation dates found";

pub fn run<S: DocumentStore + ?Sized>(
    store: &S,
    id: &DocumentId,
    config: &StampConfig,
    now: DateTime<Local>,
) -> Result<CmdResult> {
    let added = fix_document(store, id, config, now)?;
    let mut result = CmdResult::default().with_added(added);

    if added > 0 {
        info!(document = %id, added, "stamped document");
        result.affected_documents.push(id.clone());
        result.add_message(CmdMessage::success(format!(
            "Added {} to {}",
            created_dates(added),
            id
        )));
    } else {
        result.add_message(CmdMessage::info(NOTHING_TO_DO));
    }

    Ok(result)
}
