// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Each handler owns the translation of its own failures: forms are
//! re-rendered with a message and a status, write endpoints answer with a
//! status and a short text body.

use axum::{
    Extension, Form, Json,
    extract::{Path, Query, State as AxumState},
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use slopesense_api::{
    ApiError, AreaOption, CreateReportRequest, FilterRequest, LoginRequest, ReportListing,
    RunOption, SlopeListing, UserProfileRequest, create_report, dashboard_reports, delete_report,
    list_areas, list_resorts, list_runs, login, logout, parse_filter, parse_path_identifier,
    profile_overview, register_user, resolve_filter, update_profile,
};
use slopesense_domain::{Resort, parse_identifier};
use slopesense_persistence::Persistence;
use tracing::{error, info};

use crate::AppState;
use crate::session::{self, LOGIN_REQUIRED, RequestContext};
use crate::views::{self, ProfileForm};

const NOT_FOUND: &str = "Sorry, can't find that!";
const SAVE_REPORT_FAILED: &str = "Error saving report";
const DELETE_REPORT_FAILED: &str = "Error deleting report";

/// Status a re-rendered form or failed write carries for `err`.
const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
        ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs storage failures; everything else is an expected outcome.
fn log_failure(operation: &str, err: &ApiError) {
    if matches!(err, ApiError::Internal { .. }) {
        error!(operation, error = %err, "Request failed");
    } else {
        info!(operation, error = %err, "Request rejected");
    }
}

/// 303 redirect, optionally setting a cookie.
fn see_other(location: &str, cookie: Option<String>) -> Response {
    let mut response: Response = Redirect::to(location).into_response();
    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => error!(error = %e, "Session cookie is not a valid header"),
        }
    }
    response
}

/// The resort list for dropdowns on a page that is already failing.
///
/// A storage failure here yields an empty list rather than a second error.
fn resorts_or_empty(persistence: &mut Persistence) -> Vec<Resort> {
    list_resorts(persistence).unwrap_or_else(|e| {
        error!(error = %e, "Resort list unavailable");
        Vec::new()
    })
}

/// Runs `operation` under the store lock.
///
/// A failure comes back with the resort list so the page can be re-rendered
/// with its dropdown.
async fn run_or_resorts<T>(
    state: &AppState,
    operation: impl FnOnce(&mut Persistence) -> Result<T, ApiError>,
) -> Result<T, (ApiError, Vec<Resort>)> {
    let mut persistence = state.persistence.lock().await;
    let result = operation(&mut persistence).map_err(|e| {
        let resorts: Vec<Resort> = resorts_or_empty(&mut persistence);
        (e, resorts)
    });
    drop(persistence);
    result
}

/// The gate's answer, for handlers reached without a user.
fn login_required(context: &RequestContext) -> Response {
    views::login_page(context, LOGIN_REQUIRED, "", StatusCode::UNAUTHORIZED)
}

pub async fn home(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
) -> Response {
    if !context.is_authenticated() {
        return views::landing_page(&context);
    }

    let mut persistence = state.persistence.lock().await;
    let reports = dashboard_reports(&mut persistence);
    drop(persistence);

    match reports {
        Ok(reports) => views::dashboard_page(&context, "", &reports, StatusCode::OK),
        Err(e) => {
            log_failure("dashboard", &e);
            views::dashboard_page(&context, &e.user_message(), &[], status_for(&e))
        }
    }
}

#[allow(clippy::unused_async)]
pub async fn login_form(Extension(context): Extension<RequestContext>) -> Response {
    views::login_page(&context, "", "", StatusCode::OK)
}

pub async fn login_submit(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Form(request): Form<LoginRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let result = login(&mut persistence, &request, state.session_ttl);
    drop(persistence);

    match result {
        Ok(session) => match state.signer.sign(&session.session_token) {
            Ok(value) => see_other(
                "/",
                Some(session::session_cookie(
                    &value,
                    state.session_ttl,
                    state.secure_cookies,
                )),
            ),
            Err(e) => {
                error!(error = %e, "Failed to sign session cookie");
                views::login_page(
                    &context,
                    "Something went wrong. Please try again.",
                    "",
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        },
        Err(e) => {
            log_failure("login", &e);
            views::login_page(
                &context,
                &e.user_message(),
                request.username.as_deref().unwrap_or_default(),
                status_for(&e),
            )
        }
    }
}

pub async fn register_form(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let resorts = list_resorts(&mut persistence);
    drop(persistence);

    match resorts {
        Ok(resorts) => views::register_page(
            &context,
            "",
            ProfileForm::default(),
            &resorts,
            None,
            StatusCode::OK,
        ),
        Err(e) => {
            log_failure("register_form", &e);
            views::register_page(
                &context,
                &e.user_message(),
                ProfileForm::default(),
                &[],
                None,
                status_for(&e),
            )
        }
    }
}

pub async fn register_submit(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Form(request): Form<UserProfileRequest>,
) -> Response {
    match run_or_resorts(&state, |persistence| register_user(persistence, &request)).await {
        Ok(_) => see_other("/login", None),
        Err((e, resorts)) => {
            log_failure("register", &e);
            views::register_page(
                &context,
                &e.user_message(),
                ProfileForm::from(&request),
                &resorts,
                selected_resort(&request),
                status_for(&e),
            )
        }
    }
}

pub async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
) -> Response {
    if let Some(token) = &context.session_token {
        let mut persistence = state.persistence.lock().await;
        let result = logout(&mut persistence, token);
        drop(persistence);
        if let Err(e) = result {
            error!(
                user_id = context.current_user.as_ref().map(|u| u.user_id),
                error = %e,
                "Logout could not delete the session row; the token stays valid until it expires"
            );
        }
    }

    see_other(
        "/",
        Some(session::expired_session_cookie(state.secure_cookies)),
    )
}

pub async fn profile_page(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
) -> Response {
    let Some(user) = context.current_user.clone() else {
        return login_required(&context);
    };
    let form: ProfileForm = ProfileForm::from(&user);
    let fav_resort: Option<i64> = user.fav_resort;

    let mut persistence = state.persistence.lock().await;
    let overview = profile_overview(&mut persistence, user);
    drop(persistence);

    match overview {
        Ok(overview) => views::profile_page(
            &context,
            "",
            form,
            &overview.resorts,
            fav_resort,
            &overview.reports,
            StatusCode::OK,
        ),
        Err(e) => {
            log_failure("profile", &e);
            views::profile_page(
                &context,
                &e.user_message(),
                form,
                &[],
                fav_resort,
                &[],
                status_for(&e),
            )
        }
    }
}

pub async fn profile_submit(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Form(request): Form<UserProfileRequest>,
) -> Response {
    let Some(user) = context.current_user.clone() else {
        return login_required(&context);
    };

    let mut persistence = state.persistence.lock().await;
    let failure = update_profile(&mut persistence, user.user_id, &request)
        .err()
        .map(|e| {
            let reports = persistence
                .list_reports_for_user(user.user_id)
                .unwrap_or_else(|err| {
                    error!(error = %err, "Report list unavailable");
                    Vec::new()
                });
            let resorts: Vec<Resort> = resorts_or_empty(&mut persistence);
            (e, reports, resorts)
        });
    drop(persistence);

    let Some((e, reports, resorts)) = failure else {
        return see_other("/profile", None);
    };
    log_failure("update_profile", &e);
    views::profile_page(
        &context,
        &e.user_message(),
        ProfileForm::from(&request),
        &resorts,
        selected_resort(&request),
        &reports,
        status_for(&e),
    )
}

pub async fn slopes_start(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let resorts = list_resorts(&mut persistence);
    drop(persistence);

    match resorts {
        Ok(resorts) => views::slopes_start_page(&context, &resorts),
        Err(e) => {
            log_failure("slopes", &e);
            views::slopes_error_page(&context, &e.user_message(), &[], status_for(&e))
        }
    }
}

pub async fn display_slopes(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Form(request): Form<FilterRequest>,
) -> Response {
    let resolved = run_or_resorts(&state, |persistence| {
        parse_filter(&request)
            .and_then(|selection| resolve_filter::<SlopeListing>(persistence, selection))
    })
    .await;

    match resolved {
        Ok(resolved) => views::slopes_page(&context, &resolved),
        Err((e, resorts)) => {
            log_failure("display_slopes", &e);
            views::slopes_error_page(&context, &e.user_message(), &resorts, status_for(&e))
        }
    }
}

pub async fn reports_query(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(request): Query<FilterRequest>,
) -> Response {
    show_reports(&state, &context, &request).await
}

pub async fn reports_form(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Form(request): Form<FilterRequest>,
) -> Response {
    show_reports(&state, &context, &request).await
}

async fn show_reports(
    state: &AppState,
    context: &RequestContext,
    request: &FilterRequest,
) -> Response {
    let resolved = run_or_resorts(state, |persistence| {
        parse_filter(request)
            .and_then(|selection| resolve_filter::<ReportListing>(persistence, selection))
    })
    .await;

    match resolved {
        Ok(resolved) => views::reports_page(context, &resolved),
        Err((e, resorts)) => {
            log_failure("reports", &e);
            views::reports_error_page(context, &e.user_message(), &resorts, status_for(&e))
        }
    }
}

pub async fn submit_report(
    AxumState(state): AxumState<AppState>,
    Extension(context): Extension<RequestContext>,
    Path(user_id): Path<String>,
    Form(request): Form<CreateReportRequest>,
) -> Response {
    let Some(acting_user_id) = context.current_user.as_ref().map(|user| user.user_id) else {
        return login_required(&context);
    };

    let path_user_id: i64 = match parse_path_identifier("user_id", &user_id) {
        Ok(id) => id,
        Err(e) => {
            log_failure("create_report", &e);
            return (status_for(&e), SAVE_REPORT_FAILED).into_response();
        }
    };

    let mut persistence = state.persistence.lock().await;
    let created = create_report(&mut persistence, acting_user_id, path_user_id, &request);
    drop(persistence);

    match created {
        Ok(created) => {
            info!(report_id = created.report_id, run_id = created.run_id, "Filed report");
            see_other("/reports", None)
        }
        Err(e) => {
            log_failure("create_report", &e);
            (status_for(&e), SAVE_REPORT_FAILED).into_response()
        }
    }
}

pub async fn remove_report(
    AxumState(state): AxumState<AppState>,
    Path(report_id): Path<String>,
) -> Response {
    let report_id: i64 = match parse_path_identifier("report_id", &report_id) {
        Ok(id) => id,
        Err(e) => {
            log_failure("delete_report", &e);
            return (status_for(&e), DELETE_REPORT_FAILED).into_response();
        }
    };

    let mut persistence = state.persistence.lock().await;
    let deleted = delete_report(&mut persistence, report_id);
    drop(persistence);

    match deleted {
        Ok(()) => see_other("/profile", None),
        Err(e) => {
            log_failure("delete_report", &e);
            (status_for(&e), DELETE_REPORT_FAILED).into_response()
        }
    }
}

pub async fn resort_areas(
    AxumState(state): AxumState<AppState>,
    Path(resort_id): Path<String>,
) -> Response {
    let resort_id: i64 = match parse_path_identifier("resort_id", &resort_id) {
        Ok(id) => id,
        Err(e) => return (status_for(&e), e.user_message()).into_response(),
    };

    let mut persistence = state.persistence.lock().await;
    let areas = list_areas(&mut persistence, resort_id);
    drop(persistence);

    match areas {
        Ok(areas) => {
            let options: Vec<AreaOption> = areas.into_iter().map(AreaOption::from).collect();
            Json(options).into_response()
        }
        Err(e) => {
            log_failure("resort_areas", &e);
            (status_for(&e), e.user_message()).into_response()
        }
    }
}

pub async fn area_runs(
    AxumState(state): AxumState<AppState>,
    Path(area_id): Path<String>,
) -> Response {
    let area_id: i64 = match parse_path_identifier("area_id", &area_id) {
        Ok(id) => id,
        Err(e) => return (status_for(&e), e.user_message()).into_response(),
    };

    let mut persistence = state.persistence.lock().await;
    let runs = list_runs(&mut persistence, area_id);
    drop(persistence);

    match runs {
        Ok(runs) => {
            let options: Vec<RunOption> = runs.into_iter().map(RunOption::from).collect();
            Json(options).into_response()
        }
        Err(e) => {
            log_failure("area_runs", &e);
            (status_for(&e), e.user_message()).into_response()
        }
    }
}

#[allow(clippy::unused_async)]
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND).into_response()
}

/// The favorite resort a re-rendered form should keep selected.
fn selected_resort(request: &UserProfileRequest) -> Option<i64> {
    parse_identifier("fav_resort", request.fav_resort.as_deref())
        .ok()
        .flatten()
}
