// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic operations for SlopeSense.
//!
//! Every operation here takes the persistence adapter and plain request
//! data and returns a typed result or an [`ApiError`]. The HTTP server is a
//! thin shell over these functions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod filter;
mod handlers;
mod request_response;
mod seed;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, INVALID_LOGIN, NewSession};
pub use error::{
    ApiError, AuthError, email_taken, translate_domain_error, translate_persistence_error,
    username_taken,
};
pub use filter::{
    Listing, ReportListing, ResolvedFilter, SlopeListing, backfill_lineage, resolve_filter,
};
pub use handlers::{
    DASHBOARD_REPORT_LIMIT, create_report, dashboard_reports, delete_report, list_areas,
    list_resorts, list_runs, login, logout, parse_filter, parse_path_identifier,
    profile_overview, register_user, update_profile,
};
pub use request_response::{
    AreaOption, CreateReportRequest, CreateReportResponse, FilterRequest, LoginRequest,
    LoginResponse, ProfileOverview, RegisterUserResponse, RunOption, UserProfileRequest,
};
pub use seed::{
    SeedError, load_catalog_dir, parse_areas, parse_resorts, parse_runs, seed_catalog, seed_flag,
};
