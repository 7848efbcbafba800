// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTML pages.
//!
//! Templates only see flat, pre-formatted view models. Everything that
//! needs a decision (which option is selected, how a flag set reads) is
//! settled here.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use slopesense_api::{ResolvedFilter, UserProfileRequest};
use slopesense_domain::{
    Area, FilterSelection, ReportSummary, Resort, Run, RunSummary, User, format_date,
};
use tracing::error;

use crate::session::RequestContext;

/// Navigation state shared by every page.
pub struct Nav {
    pub signed_in: bool,
    pub user_id: i64,
    pub username: String,
}

impl From<&RequestContext> for Nav {
    fn from(context: &RequestContext) -> Self {
        context.current_user.as_ref().map_or_else(
            || Self {
                signed_in: false,
                user_id: 0,
                username: String::new(),
            },
            |user| Self {
                signed_in: true,
                user_id: user.user_id,
                username: user.username.clone(),
            },
        )
    }
}

/// One `<option>` of a dropdown.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: i64, label: String, selected: Option<i64>) -> Self {
        Self {
            value: value.to_string(),
            label,
            selected: selected == Some(value),
        }
    }
}

fn resort_options(resorts: &[Resort], selected: Option<i64>) -> Vec<SelectOption> {
    resorts
        .iter()
        .map(|r| SelectOption::new(r.resort_id, r.resort_name.clone(), selected))
        .collect()
}

fn area_options(areas: &[Area], selected: Option<i64>) -> Vec<SelectOption> {
    areas
        .iter()
        .map(|a| SelectOption::new(a.area_id, a.label(), selected))
        .collect()
}

fn run_options(runs: &[Run], selected: Option<i64>) -> Vec<SelectOption> {
    runs.iter()
        .map(|r| SelectOption::new(r.run_id, r.run_name.clone(), selected))
        .collect()
}

/// A run on the slopes page.
pub struct SlopeRow {
    pub run_id: i64,
    pub run_name: String,
    pub difficulty: String,
    pub zone: String,
    pub resort_name: String,
    pub status: String,
    pub features: String,
}

impl From<&RunSummary> for SlopeRow {
    fn from(run: &RunSummary) -> Self {
        let mut features: Vec<&str> = Vec::new();
        if run.is_terrain_park {
            features.push("terrain park");
        }
        if run.backcountry_access {
            features.push("backcountry access");
        }
        if run.bootpack_req {
            features.push("bootpack");
        }

        Self {
            run_id: run.run_id,
            run_name: run.run_name.clone(),
            difficulty: run.difficulty.clone().unwrap_or_default(),
            zone: run.zone_name.clone().unwrap_or_default(),
            resort_name: run.resort_name.clone(),
            status: String::from(if run.is_open { "Open" } else { "Closed" }),
            features: features.join(", "),
        }
    }
}

/// A report on the dashboard, profile, or reports page.
pub struct ReportRow {
    pub report_id: i64,
    pub run_id: i64,
    pub run_name: String,
    pub zone: String,
    pub resort_name: String,
    pub username: String,
    pub description: String,
    pub conditions: String,
    pub date_reported: String,
}

impl From<&ReportSummary> for ReportRow {
    fn from(report: &ReportSummary) -> Self {
        Self {
            report_id: report.report_id,
            run_id: report.run_id,
            run_name: report.run_name.clone(),
            zone: report.zone_name.clone().unwrap_or_default(),
            resort_name: report.resort_name.clone(),
            username: report.username.clone(),
            description: report.description.clone().unwrap_or_default(),
            conditions: report.conditions.labels().join(", "),
            date_reported: report.date_reported.clone(),
        }
    }
}

fn report_rows(reports: &[ReportSummary]) -> Vec<ReportRow> {
    reports.iter().map(ReportRow::from).collect()
}

/// Registration and profile form values.
#[derive(Default)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
}

impl From<&UserProfileRequest> for ProfileForm {
    fn from(request: &UserProfileRequest) -> Self {
        Self {
            username: request.username.clone().unwrap_or_default(),
            email: request.email.clone().unwrap_or_default(),
            first_name: request.first_name.clone().unwrap_or_default(),
            last_name: request.last_name.clone().unwrap_or_default(),
            birthday: request.birthday.clone().unwrap_or_default(),
        }
    }
}

impl From<&User> for ProfileForm {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            birthday: user
                .birthday
                .and_then(|d| format_date(d).ok())
                .unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage {
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub nav: Nav,
    pub message: String,
    pub reports: Vec<ReportRow>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub nav: Nav,
    pub message: String,
    pub username: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub nav: Nav,
    pub message: String,
    pub form: ProfileForm,
    pub resorts: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub nav: Nav,
    pub message: String,
    pub form: ProfileForm,
    pub resorts: Vec<SelectOption>,
    pub favorite: String,
    pub reports: Vec<ReportRow>,
}

#[derive(Template)]
#[template(path = "slopes.html")]
pub struct SlopesPage {
    pub nav: Nav,
    pub message: String,
    pub resorts: Vec<SelectOption>,
    pub areas: Vec<SelectOption>,
    pub runs: Vec<SelectOption>,
    pub show_listing: bool,
    pub rows: Vec<SlopeRow>,
}

#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsPage {
    pub nav: Nav,
    pub message: String,
    pub resorts: Vec<SelectOption>,
    pub areas: Vec<SelectOption>,
    pub runs: Vec<SelectOption>,
    pub rows: Vec<ReportRow>,
}

/// Renders `template` with `status`.
///
/// A rendering failure is logged and answered with a bare 500.
pub fn render<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.",
            )
                .into_response()
        }
    }
}

pub fn landing_page(context: &RequestContext) -> Response {
    render(
        &LandingPage {
            nav: Nav::from(context),
        },
        StatusCode::OK,
    )
}

pub fn dashboard_page(
    context: &RequestContext,
    message: &str,
    reports: &[ReportSummary],
    status: StatusCode,
) -> Response {
    render(
        &DashboardPage {
            nav: Nav::from(context),
            message: String::from(message),
            reports: report_rows(reports),
        },
        status,
    )
}

pub fn login_page(
    context: &RequestContext,
    message: &str,
    username: &str,
    status: StatusCode,
) -> Response {
    render(
        &LoginPage {
            nav: Nav::from(context),
            message: message.to_string(),
            username: username.to_string(),
        },
        status,
    )
}

pub fn register_page(
    context: &RequestContext,
    message: &str,
    form: ProfileForm,
    resorts: &[Resort],
    fav_resort: Option<i64>,
    status: StatusCode,
) -> Response {
    render(
        &RegisterPage {
            nav: Nav::from(context),
            message: message.to_string(),
            form,
            resorts: resort_options(resorts, fav_resort),
        },
        status,
    )
}

/// Profile page. `favorite` names the stored favorite resort.
pub fn profile_page(
    context: &RequestContext,
    message: &str,
    form: ProfileForm,
    resorts: &[Resort],
    fav_resort: Option<i64>,
    reports: &[ReportSummary],
    status: StatusCode,
) -> Response {
    let favorite: String = context
        .current_user
        .as_ref()
        .and_then(|user| user.fav_resort)
        .and_then(|id| resorts.iter().find(|r| r.resort_id == id))
        .map(|r| r.resort_name.clone())
        .unwrap_or_default();

    render(
        &ProfilePage {
            nav: Nav::from(context),
            message: message.to_string(),
            form,
            resorts: resort_options(resorts, fav_resort),
            favorite,
            reports: report_rows(reports),
        },
        status,
    )
}

/// Slopes page with only the resort dropdown.
pub fn slopes_start_page(context: &RequestContext, resorts: &[Resort]) -> Response {
    render(
        &SlopesPage {
            nav: Nav::from(context),
            message: String::new(),
            resorts: resort_options(resorts, None),
            areas: Vec::new(),
            runs: Vec::new(),
            show_listing: false,
            rows: Vec::new(),
        },
        StatusCode::OK,
    )
}

pub fn slopes_page(context: &RequestContext, resolved: &ResolvedFilter<RunSummary>) -> Response {
    let selection: FilterSelection = resolved.selection;
    render(
        &SlopesPage {
            nav: Nav::from(context),
            message: String::new(),
            resorts: resort_options(&resolved.resorts, selection.resort_id),
            areas: area_options(&resolved.areas, selection.area_id),
            runs: run_options(&resolved.runs, selection.run_id),
            show_listing: true,
            rows: resolved.rows.iter().map(SlopeRow::from).collect(),
        },
        StatusCode::OK,
    )
}

/// Slopes page carrying an error and no listing.
pub fn slopes_error_page(
    context: &RequestContext,
    message: &str,
    resorts: &[Resort],
    status: StatusCode,
) -> Response {
    render(
        &SlopesPage {
            nav: Nav::from(context),
            message: message.to_string(),
            resorts: resort_options(resorts, None),
            areas: Vec::new(),
            runs: Vec::new(),
            show_listing: false,
            rows: Vec::new(),
        },
        status,
    )
}

pub fn reports_page(
    context: &RequestContext,
    resolved: &ResolvedFilter<ReportSummary>,
) -> Response {
    let selection: FilterSelection = resolved.selection;
    render(
        &ReportsPage {
            nav: Nav::from(context),
            message: String::new(),
            resorts: resort_options(&resolved.resorts, selection.resort_id),
            areas: area_options(&resolved.areas, selection.area_id),
            runs: run_options(&resolved.runs, selection.run_id),
            rows: report_rows(&resolved.rows),
        },
        StatusCode::OK,
    )
}

/// Reports page carrying an error and no listing.
pub fn reports_error_page(
    context: &RequestContext,
    message: &str,
    resorts: &[Resort],
    status: StatusCode,
) -> Response {
    render(
        &ReportsPage {
            nav: Nav::from(context),
            message: message.to_string(),
            resorts: resort_options(resorts, None),
            areas: Vec::new(),
            runs: Vec::new(),
            rows: Vec::new(),
        },
        status,
    )
}
