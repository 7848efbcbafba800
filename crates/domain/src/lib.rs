// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for SlopeSense.
//!
//! The terrain catalog is a strict three-level hierarchy:
//! resort → area → run. Users file condition reports against runs.
//! This crate holds the entity records, the cascading filter selection,
//! and the pure field validation used before anything is written.

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

mod catalog;
mod error;
mod filter;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogSeed, NewArea, NewResort, NewRun, SeedArea, SeedRun};
pub use error::DomainError;
pub use filter::{
    FilterSelection, ReportSummary, RunSummary, parse_identifier, parse_required_identifier,
};
pub use timestamp::{format_date, format_timestamp, now_timestamp, parse_date, parse_timestamp};
pub use types::{Area, ConditionFlags, NewReport, Report, Resort, Run, User, UserProfile};
pub use validation::{RawProfile, parse_flag, validate_user_profile};
