// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::filter::parse_required_identifier;
use crate::timestamp::parse_date;
use crate::types::UserProfile;

/// Values accepted as "true" for checkbox flags.
const TRUTHY: &[&str] = &["true", "1", "t", "yes", "y", "on"];

/// Unvalidated profile fields exactly as submitted by a form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawProfile<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub birthday: Option<&'a str>,
    pub fav_resort: Option<&'a str>,
}

/// Validates the registration/profile form fields.
///
/// Every field is required. Text fields are trimmed, except the password,
/// which is kept exactly as submitted. This does NOT check uniqueness
/// (that requires the store).
///
/// # Errors
///
/// Returns an error if:
/// - any field is absent or blank
/// - the birthday is not a `YYYY-MM-DD` date
/// - the favorite resort is not a positive integer
pub fn validate_user_profile(raw: &RawProfile<'_>) -> Result<UserProfile, DomainError> {
    let username: String = required("username", raw.username)?;
    let email: String = required("email", raw.email)?;

    let password: String = raw
        .password
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .ok_or(DomainError::MissingField { field: "password" })?;

    let first_name: String = required("first_name", raw.first_name)?;
    let last_name: String = required("last_name", raw.last_name)?;
    let birthday_text: String = required("birthday", raw.birthday)?;
    let birthday = parse_date("birthday", &birthday_text)?;
    let fav_resort: i64 = parse_required_identifier("fav_resort", raw.fav_resort)?;

    Ok(UserProfile {
        username,
        email,
        password,
        first_name,
        last_name,
        birthday,
        fav_resort,
    })
}

/// Interprets a checkbox value.
///
/// Absent values and anything outside the accepted set are `false`.
#[must_use]
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().to_lowercase())
        .is_some_and(|v| TRUTHY.contains(&v.as_str()))
}

fn required(field: &'static str, raw: Option<&str>) -> Result<String, DomainError> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(DomainError::MissingField { field })
}
