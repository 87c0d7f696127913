//! Picks the date that goes into a stamp.
//!
//! - Live edits always use today.
//! - Retroactive runs on a known document use its creation or modification time,
//!   depending on [`StampConfig::use_file_creation_date`].
//! - Retroactive runs on loose text fall back to today.
//!
//! Every timestamp is truncated to the calendar day in local time.

use crate::config::StampConfig;
use crate::model::DocumentMeta;
use chrono::{DateTime, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which document timestamp feeds retroactive stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Created,
    Modified,
}

impl DateSource {
    pub fn from_config(config: &StampConfig) -> Self {
        if config.use_file_creation_date {
            DateSource::Created
        } else {
            DateSource::Modified
        }
    }

    pub fn pick(self, meta: &DocumentMeta) -> DateTime<Local> {
        match self {
            DateSource::Created => meta.created_at,
            DateSource::Modified => meta.modified_at,
        }
    }
}

pub fn today(now: DateTime<Local>) -> NaiveDate {
    now.date_naive()
}

/// Stamp date for a retroactive pass. `meta` is `None` for text not tied to a document.
pub fn retroactive_date(
    config: &StampConfig,
    meta: Option<&DocumentMeta>,
    now: DateTime<Local>,
) -> NaiveDate {
    match meta {
        Some(meta) => DateSource::from_config(config).pick(meta).date_naive(),
        None => today(now),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    fn meta() -> DocumentMeta {
        DocumentMeta::new(at(2023, 2, 10, 23), at(2024, 6, 1, 0))
    }

    #[test]
    fn creation_date_is_default() {
        let config = StampConfig::default();
        let date = retroactive_date(&config, Some(&meta()), at(2025, 1, 1, 12));
        assert_eq!(format_date(date), "2023-02-10");
    }

    #[test]
    fn modified_date_when_configured() {
        let config = StampConfig {
            use_file_creation_date: false,
            ..StampConfig::default()
        };
        let date = retroactive_date(&config, Some(&meta()), at(2025, 1, 1, 12));
        assert_eq!(format_date(date), "2024-06-01");
    }

    #[test]
    fn unknown_document_falls_back_to_now() {
        let config = StampConfig::default();
        let date = retroactive_date(&config, None, at(2025, 3, 15, 8));
        assert_eq!(format_date(date), "2025-03-15");
    }

    #[test]
    fn today_truncates_to_calendar_day() {
        assert_eq!(format_date(today(at(2024, 3, 15, 23))), "2024-03-15");
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2024-01-31"), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("31/01/2024"), None);
    }
}
