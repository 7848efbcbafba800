// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types.
//!
//! Request fields are raw optional strings exactly as a form or query
//! string delivers them. Blank and missing are treated alike; parsing and
//! validation happen in the handlers.

use serde::{Deserialize, Serialize};
use slopesense_domain::{
    Area, ConditionFlags, RawProfile, ReportSummary, Resort, Run, User, parse_flag,
};

/// Registration and profile-update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<String>,
    pub fav_resort: Option<String>,
}

impl UserProfileRequest {
    /// Borrows the fields for validation.
    #[must_use]
    pub fn as_raw(&self) -> RawProfile<'_> {
        RawProfile {
            username: self.username.as_deref(),
            email: self.email.as_deref(),
            password: self.password.as_deref(),
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            birthday: self.birthday.as_deref(),
            fav_resort: self.fav_resort.as_deref(),
        }
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Cascading filter selectors from a dropdown form or a deep link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub resort_id: Option<String>,
    pub area_id: Option<String>,
    pub run_id: Option<String>,
}

/// New report form. Condition flags arrive as checkbox values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub run_id: Option<String>,
    pub description: Option<String>,
    pub obstacle: Option<String>,
    pub groomed: Option<String>,
    pub icy: Option<String>,
    pub powder: Option<String>,
    pub moguls: Option<String>,
    pub granular: Option<String>,
    pub thin_cover: Option<String>,
    pub packed: Option<String>,
    pub wet: Option<String>,
}

impl CreateReportRequest {
    /// Interprets the checkbox values. Unchecked boxes are absent.
    #[must_use]
    pub fn conditions(&self) -> ConditionFlags {
        ConditionFlags {
            obstacle: parse_flag(self.obstacle.as_deref()),
            groomed: parse_flag(self.groomed.as_deref()),
            icy: parse_flag(self.icy.as_deref()),
            powder: parse_flag(self.powder.as_deref()),
            moguls: parse_flag(self.moguls.as_deref()),
            granular: parse_flag(self.granular.as_deref()),
            thin_cover: parse_flag(self.thin_cover.as_deref()),
            packed: parse_flag(self.packed.as_deref()),
            wet: parse_flag(self.wet.as_deref()),
        }
    }
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user_id: i64,
    pub username: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub session_token: String,
    pub expires_at: String,
    pub user: User,
}

/// API response for a successful report submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportResponse {
    pub report_id: i64,
    pub run_id: i64,
    pub date_reported: String,
}

/// Everything the profile page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverview {
    pub user: User,
    pub favorite_resort: Option<Resort>,
    pub resorts: Vec<Resort>,
    pub reports: Vec<ReportSummary>,
}

/// Area option for the JSON dropdown endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaOption {
    pub area_id: i64,
    pub resort_id: i64,
    pub label: String,
}

impl From<Area> for AreaOption {
    fn from(area: Area) -> Self {
        Self {
            label: area.label(),
            area_id: area.area_id,
            resort_id: area.resort_id,
        }
    }
}

/// Run option for the JSON dropdown endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOption {
    pub run_id: i64,
    pub area_id: i64,
    pub run_name: String,
    pub difficulty: Option<String>,
}

impl From<Run> for RunOption {
    fn from(run: Run) -> Self {
        Self {
            run_id: run.run_id,
            area_id: run.area_id,
            run_name: run.run_name,
            difficulty: run.difficulty,
        }
    }
}
