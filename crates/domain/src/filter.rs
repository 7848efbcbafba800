// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cascading resort → area → run selection and the listing rows it yields.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::ConditionFlags;

/// Zero or more of the three hierarchy selectors.
///
/// An absent selector imposes no constraint on a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub resort_id: Option<i64>,
    pub area_id: Option<i64>,
    pub run_id: Option<i64>,
}

impl FilterSelection {
    /// Parses raw dropdown values.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank value is not a positive integer.
    pub fn from_raw(
        resort_id: Option<&str>,
        area_id: Option<&str>,
        run_id: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            resort_id: parse_identifier("resort_id", resort_id)?,
            area_id: parse_identifier("area_id", area_id)?,
            run_id: parse_identifier("run_id", run_id)?,
        })
    }

    /// Returns `true` when no selector is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.resort_id.is_none() && self.area_id.is_none() && self.run_id.is_none()
    }
}

/// Parses an optional identifier from a form or query value.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` if a non-blank value is not a
/// positive integer.
pub fn parse_identifier(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(DomainError::InvalidIdentifier {
            field,
            value: value.to_string(),
        }),
    }
}

/// Parses an identifier that must be present.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or blank, or
/// `DomainError::InvalidIdentifier` if it is not a positive integer.
pub fn parse_required_identifier(field: &'static str, raw: Option<&str>) -> Result<i64, DomainError> {
    parse_identifier(field, raw)?.ok_or(DomainError::MissingField { field })
}

/// A run joined with its area and resort, as shown on the slopes page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunSummary {
    pub run_id: i64,
    pub run_name: String,
    pub difficulty: Option<String>,
    pub is_open: bool,
    pub is_terrain_park: bool,
    pub backcountry_access: bool,
    pub bootpack_req: bool,
    pub area_id: i64,
    pub zone_name: Option<String>,
    pub base_area: Option<String>,
    pub resort_id: i64,
    pub resort_name: String,
}

/// A report joined with its run, area, resort and author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub report_id: i64,
    pub run_id: i64,
    pub run_name: String,
    pub area_id: i64,
    pub zone_name: Option<String>,
    pub resort_id: i64,
    pub resort_name: String,
    pub user_id: i64,
    pub username: String,
    pub description: Option<String>,
    pub conditions: ConditionFlags,
    pub date_reported: String,
}
