use crate::commands::helpers::created_dates;
use crate::commands::{CmdMessage, CmdResult};
use crate::date::format_date;
use crate::stamp::stamp;
use chrono::NaiveDate;

use super::document::NOTHING_TO_DO;

/// Stamp loose text that is not tied to any document.
pub fn run(text: &str, date: NaiveDate) -> CmdResult {
    let outcome = stamp(text, &format_date(date));
    let mut result = CmdResult::default().with_added(outcome.added);

    if outcome.added > 0 {
        result.add_message(CmdMessage::success(format!(
            "Added {}",
            created_dates(outcome.added)
        )));
    } else {
        result.add_message(CmdMessage::info(NOTHING_TO_DO));
    }

    result.with_text(outcome.text)
}
