//! Date filter: keeps records published on the reference day in a fixed timezone.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::Record;

/// True iff `record` was published on `reference_date` as seen in `tz`.
/// Records without a publication time never match.
pub fn keep(record: &Record, reference_date: NaiveDate, tz: Tz) -> bool {
    record
        .published
        .map(|published| published.with_timezone(&tz).date_naive() == reference_date)
        .unwrap_or(false)
}

/// Today's calendar date in `tz`
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Same-day filter applied uniformly to every platform
#[derive(Debug, Clone, Copy)]
pub struct DateFilter {
    reference_date: NaiveDate,
    tz: Tz,
}

impl DateFilter {
    pub fn new(reference_date: NaiveDate, tz: Tz) -> Self {
        Self { reference_date, tz }
    }

    /// Retain matching records, preserving order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| keep(record, self.reference_date, self.tz))
            .collect()
    }
}
