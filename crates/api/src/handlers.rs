// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic operations.
//!
//! Each operation validates its input, checks its business constraint,
//! performs a single write, and returns a typed result. Translating the
//! result into a page, a redirect, or a status code is the caller's job.

use slopesense_domain::{
    Area, DomainError, FilterSelection, NewReport, ReportSummary, Resort, Run, User,
    UserProfile, now_timestamp, parse_required_identifier, validate_user_profile,
};
use slopesense_persistence::Persistence;
use time::Duration;
use tracing::{error, info, warn};

use crate::auth::{AuthenticationService, INVALID_LOGIN, NewSession};
use crate::error::{
    ApiError, email_taken, translate_domain_error, translate_persistence_error, username_taken,
};
use crate::request_response::{
    CreateReportRequest, CreateReportResponse, FilterRequest, LoginRequest, LoginResponse,
    ProfileOverview, RegisterUserResponse, UserProfileRequest,
};

/// Number of reports shown on the dashboard.
pub const DASHBOARD_REPORT_LIMIT: i64 = 3;

/// Registers a new user.
///
/// # Errors
///
/// Returns an error if:
/// - a required field is missing or malformed
/// - the username or email is already taken
/// - the favorite resort does not exist
/// - the store fails
pub fn register_user(
    persistence: &mut Persistence,
    request: &UserProfileRequest,
) -> Result<RegisterUserResponse, ApiError> {
    let profile: UserProfile =
        validate_user_profile(&request.as_raw()).map_err(translate_domain_error)?;

    ensure_identity_available(persistence, &profile, None)?;

    let user_id: i64 = persistence
        .create_user(&profile)
        .map_err(translate_persistence_error)?;

    info!(user_id, username = %profile.username, "Registered user");

    Ok(RegisterUserResponse {
        user_id,
        username: profile.username,
    })
}

/// Checks credentials and opens a session.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` for missing or wrong
/// credentials, or `ApiError::Internal` if the store fails.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_ttl: Duration,
) -> Result<LoginResponse, ApiError> {
    let (Some(username), Some(password)) = (
        request.username.as_deref().map(str::trim).filter(|u| !u.is_empty()),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from(INVALID_LOGIN),
        });
    };

    let session: NewSession =
        AuthenticationService::login(persistence, username, password, session_ttl)?;

    Ok(LoginResponse {
        session_token: session.session_token,
        expires_at: session.expires_at,
        user: session.user,
    })
}

/// Ends a session.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Overwrites the acting user's profile.
///
/// Returns the stored record after the update.
///
/// # Errors
///
/// Returns an error if:
/// - a required field is missing or malformed
/// - the username or email belongs to a different user
/// - the favorite resort does not exist
/// - the store fails
pub fn update_profile(
    persistence: &mut Persistence,
    user_id: i64,
    request: &UserProfileRequest,
) -> Result<User, ApiError> {
    let profile: UserProfile =
        validate_user_profile(&request.as_raw()).map_err(translate_domain_error)?;

    ensure_identity_available(persistence, &profile, Some(user_id))?;

    persistence
        .update_user(user_id, &profile)
        .map_err(translate_persistence_error)?;

    info!(user_id, "Updated profile");

    persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })
}

/// Files a condition report on behalf of the acting user.
///
/// `path_user_id` is the user named in the submission URL; it must be the
/// acting user.
///
/// # Errors
///
/// Returns an error if:
/// - the path user is not the acting user
/// - `run_id` is missing, malformed, or names no run
/// - the store fails
pub fn create_report(
    persistence: &mut Persistence,
    acting_user_id: i64,
    path_user_id: i64,
    request: &CreateReportRequest,
) -> Result<CreateReportResponse, ApiError> {
    if acting_user_id != path_user_id {
        warn!(acting_user_id, path_user_id, "Refused report for another user");
        return Err(ApiError::Unauthorized {
            action: String::from("create_report"),
            reason: String::from("Reports can only be filed as yourself"),
        });
    }

    let run_id: i64 = parse_required_identifier("run_id", request.run_id.as_deref())
        .map_err(translate_domain_error)?;

    if persistence
        .get_run(run_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::InvalidInput {
            field: String::from("run_id"),
            message: format!("Run {run_id} does not exist"),
        });
    }

    let date_reported: String = now_timestamp().map_err(translate_domain_error)?;
    let description: Option<String> = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let report: NewReport = NewReport {
        run_id,
        user_id: acting_user_id,
        description,
        conditions: request.conditions(),
        date_reported,
    };

    let report_id: i64 = persistence
        .create_report(&report)
        .map_err(translate_persistence_error)?;

    Ok(CreateReportResponse {
        report_id,
        run_id,
        date_reported: report.date_reported,
    })
}

/// Deletes a report by ID.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no such report exists, or
/// `ApiError::Internal` if the store fails.
pub fn delete_report(persistence: &mut Persistence, report_id: i64) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_report(report_id)
        .map_err(translate_persistence_error)?;

    if !deleted {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Report"),
            message: format!("Report {report_id} does not exist"),
        });
    }

    info!(report_id, "Deleted report");
    Ok(())
}

/// Latest reports for the dashboard.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn dashboard_reports(persistence: &mut Persistence) -> Result<Vec<ReportSummary>, ApiError> {
    persistence
        .list_recent_reports(DASHBOARD_REPORT_LIMIT)
        .map_err(translate_persistence_error)
}

/// Loads the acting user's profile page.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn profile_overview(persistence: &mut Persistence, user: User) -> Result<ProfileOverview, ApiError> {
    let reports: Vec<ReportSummary> = persistence
        .list_reports_for_user(user.user_id)
        .map_err(translate_persistence_error)?;
    let resorts: Vec<Resort> = list_resorts(persistence)?;
    let favorite_resort: Option<Resort> = user
        .fav_resort
        .and_then(|id| resorts.iter().find(|r| r.resort_id == id).cloned());

    Ok(ProfileOverview {
        user,
        favorite_resort,
        resorts,
        reports,
    })
}

/// Lists every resort.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_resorts(persistence: &mut Persistence) -> Result<Vec<Resort>, ApiError> {
    persistence.list_resorts().map_err(translate_persistence_error)
}

/// Lists the areas of a resort for dropdown population.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_areas(persistence: &mut Persistence, resort_id: i64) -> Result<Vec<Area>, ApiError> {
    persistence
        .list_areas_for_resort(resort_id)
        .map_err(translate_persistence_error)
}

/// Lists the runs of an area for dropdown population.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_runs(persistence: &mut Persistence, area_id: i64) -> Result<Vec<Run>, ApiError> {
    persistence
        .list_runs_for_area(area_id)
        .map_err(translate_persistence_error)
}

/// Parses dropdown or query-string selectors.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a present selector is not a
/// positive integer.
pub fn parse_filter(request: &FilterRequest) -> Result<FilterSelection, ApiError> {
    FilterSelection::from_raw(
        request.resort_id.as_deref(),
        request.area_id.as_deref(),
        request.run_id.as_deref(),
    )
    .map_err(translate_domain_error)
}

/// Parses an identifier taken from a URL path segment.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the segment is not a positive integer.
pub fn parse_path_identifier(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    parse_required_identifier(field, Some(raw)).map_err(|e| match e {
        DomainError::MissingField { .. } => translate_domain_error(DomainError::InvalidIdentifier {
            field,
            value: raw.to_string(),
        }),
        other => translate_domain_error(other),
    })
}

/// Rejects a username or email already held by a user other than `excluding`.
fn ensure_identity_available(
    persistence: &mut Persistence,
    profile: &UserProfile,
    excluding: Option<i64>,
) -> Result<(), ApiError> {
    let username_in_use: bool = persistence
        .is_username_taken(&profile.username, excluding)
        .map_err(|e| {
            error!(error = %e, "Username check failed");
            translate_persistence_error(e)
        })?;
    if username_in_use {
        return Err(username_taken());
    }

    let email_in_use: bool = persistence
        .is_email_taken(&profile.email, excluding)
        .map_err(|e| {
            error!(error = %e, "Email check failed");
            translate_persistence_error(e)
        })?;
    if email_in_use {
        return Err(email_taken());
    }

    Ok(())
}
