//! Date-range view over the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult};

use crate::record::TransactionRecord;

/// Inclusive calendar date range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Records dated within `range`, in ledger order.
pub fn filter_by_date<'a, I>(records: I, range: DateRange) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|r| range.contains(r.date()))
        .collect()
}
