//! Transaction history export.
//!
//! # Responsibility
//! - Flatten vendor ledgers into one CSV document for download.
//! - Apply the optional inclusive day-granularity date filter.
//!
//! # Invariants
//! - Row order follows the input: vendor order, then each vendor's
//!   newest-first log.
//! - Legacy entries without custody information render as `ORGANIZATION`.

use crate::model::vendor::Vendor;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::string::FromUtf8Error;

/// CSV column headers, fixed for data-format compatibility.
pub const CSV_HEADERS: [&str; 6] = [
    "Vendor Name",
    "Date",
    "Type",
    "Cylinder Type",
    "Count",
    "Ownership",
];

const DATE_COLUMN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILE_NAME_PREFIX: &str = "gastrack_transactions";

/// Export failures.
#[derive(Debug)]
pub enum ReportError {
    /// Nothing to export for the selected criteria.
    NoMatchingTransactions,
    /// CSV writer failure.
    Csv(csv::Error),
    /// Produced bytes were not valid UTF-8.
    Utf8(FromUtf8Error),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatchingTransactions => {
                write!(f, "there are no transactions for the selected criteria")
            }
            Self::Csv(err) => write!(f, "{err}"),
            Self::Utf8(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoMatchingTransactions => None,
            Self::Csv(err) => Some(err),
            Self::Utf8(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ReportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<FromUtf8Error> for ReportError {
    fn from(value: FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}

/// Day-granularity date filter, inclusive on both ends.
///
/// A missing `to` means the single day `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl ReportRange {
    /// Whether a timestamp falls inside the range.
    ///
    /// The window runs from `from` midnight UTC up to (exclusive) midnight
    /// after the last day, which makes both day boundaries inclusive.
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        let start = self.from.and_time(NaiveTime::MIN).and_utc();
        let end = self.to.unwrap_or(self.from).and_time(NaiveTime::MIN).and_utc()
            + Duration::days(1);
        *date >= start && *date < end
    }
}

/// Renders all vendor transactions into one CSV document.
///
/// # Errors
/// - `NoMatchingTransactions` when no entry survives the filter (or there
///   are none at all).
/// - `Csv` / `Utf8` on writer failures.
pub fn export_csv(
    vendors: &[Vendor],
    range: Option<&ReportRange>,
) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    let mut rows = 0usize;
    for vendor in vendors {
        for entry in &vendor.transactions {
            if let Some(range) = range {
                if !range.contains(&entry.date) {
                    continue;
                }
            }
            let date = entry.date.format(DATE_COLUMN_FORMAT).to_string();
            let count = entry.count.to_string();
            writer.write_record([
                vendor.name.as_str(),
                date.as_str(),
                entry.kind.as_wire_str().to_ascii_uppercase().as_str(),
                entry.cylinder_type.as_wire_str().to_ascii_uppercase().as_str(),
                count.as_str(),
                entry.ownership.as_wire_str().to_ascii_uppercase().as_str(),
            ])?;
            rows += 1;
        }
    }

    if rows == 0 {
        return Err(ReportError::NoMatchingTransactions);
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Suggested download file name for an export.
pub fn export_file_name(range: Option<&ReportRange>) -> String {
    let date_part = match range {
        None => "_all_time".to_string(),
        Some(ReportRange { from, to: Some(to) }) => {
            format!("_{}_to_{}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
        }
        Some(ReportRange { from, to: None }) => {
            format!("_from_{}", from.format("%Y-%m-%d"))
        }
    };
    format!("{FILE_NAME_PREFIX}{date_part}.csv")
}
