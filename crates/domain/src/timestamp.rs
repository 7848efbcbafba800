// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text encodings for stored timestamps and dates.
//!
//! Timestamps use the same UTC `YYYY-MM-DD HH:MM:SS` shape as SQLite's
//! `CURRENT_TIMESTAMP`, so lexical and chronological order agree.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::DomainError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats an instant as a stored UTC timestamp.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, DomainError> {
    instant
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))
}

/// Returns the current instant as a stored UTC timestamp.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn now_timestamp() -> Result<String, DomainError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Parses a stored UTC timestamp.
///
/// # Errors
///
/// Returns an error if the text is not in the stored shape.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, DomainError> {
    PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| DomainError::InvalidTimestamp(format!("'{text}': {e}")))
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the text is not a valid date.
pub fn parse_date(field: &'static str, text: &str) -> Result<Date, DomainError> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| DomainError::InvalidDate {
        field,
        value: text.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))
}
