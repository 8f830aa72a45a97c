//! Field-level checks used by the document model.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

const ISO_LOCAL_DATE: &str = "%Y-%m-%d";
const ISO_LOCAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_LOCAL_DATE_TIME_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

/// Require a non-blank string.
///
/// Whitespace-only values count as missing: the API treats them as absent
/// INNs and codes, so they are refused before a request slot is spent.
pub fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidData(format!("{field} is required")));
    }
    Ok(())
}

/// Require an ISO local date such as `2024-01-31`.
pub fn iso_local_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_LOCAL_DATE).map_err(|e| {
        Error::InvalidData(format!("{field} must be an ISO date (YYYY-MM-DD), got {value:?}: {e}"))
    })
}

/// Require an ISO local date-time such as `2024-01-31T12:00:00`.
///
/// Seconds may be omitted (`2024-01-31T12:00`); fractional seconds are
/// accepted.
pub fn iso_local_date_time(field: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, ISO_LOCAL_DATE_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(value, ISO_LOCAL_DATE_TIME_NO_SECONDS))
        .map_err(|e| {
            Error::InvalidData(format!(
                "{field} must be an ISO date-time (YYYY-MM-DDTHH:MM[:SS]), got {value:?}: {e}"
            ))
        })
}

/// Accept either an ISO local date-time or an ISO local date.
pub fn iso_local_date_or_date_time(field: &str, value: &str) -> Result<()> {
    if iso_local_date_time(field, value).is_ok() {
        return Ok(());
    }
    iso_local_date(field, value).map(|_| ()).map_err(|_| {
        Error::InvalidData(format!(
            "{field} must be an ISO date or date-time, got {value:?}"
        ))
    })
}

/// Validate an optional ISO local date, if present.
pub fn optional_iso_local_date(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => iso_local_date(field, value).map(|_| ()),
        None => Ok(()),
    }
}
