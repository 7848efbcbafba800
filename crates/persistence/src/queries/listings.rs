// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Joined listings for the slopes and reports pages.
//!
//! Each listing starts from the fully joined hierarchy and adds one
//! equality filter per present selector. An absent selector adds nothing,
//! so omitting a level widens the result instead of failing.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slopesense_domain::{ConditionFlags, FilterSelection, ReportSummary, RunSummary};
use tracing::debug;

use crate::diesel_schema::{areas, reports, resorts, runs, users};
use crate::error::PersistenceError;

#[derive(Queryable)]
#[allow(clippy::struct_excessive_bools)]
struct RunSummaryRow {
    run_id: i64,
    run_name: String,
    difficulty: Option<String>,
    is_open: bool,
    is_terrain_park: bool,
    backcountry_access: bool,
    bootpack_req: bool,
    area_id: i64,
    zone_name: Option<String>,
    base_area: Option<String>,
    resort_id: i64,
    resort_name: String,
}

impl From<RunSummaryRow> for RunSummary {
    fn from(row: RunSummaryRow) -> Self {
        Self {
            run_id: row.run_id,
            run_name: row.run_name,
            difficulty: row.difficulty,
            is_open: row.is_open,
            is_terrain_park: row.is_terrain_park,
            backcountry_access: row.backcountry_access,
            bootpack_req: row.bootpack_req,
            area_id: row.area_id,
            zone_name: row.zone_name,
            base_area: row.base_area,
            resort_id: row.resort_id,
            resort_name: row.resort_name,
        }
    }
}

#[derive(Queryable)]
#[allow(clippy::struct_excessive_bools)]
struct ReportSummaryRow {
    report_id: i64,
    run_id: i64,
    run_name: String,
    area_id: i64,
    zone_name: Option<String>,
    resort_id: i64,
    resort_name: String,
    user_id: i64,
    username: String,
    description: Option<String>,
    obstacle: bool,
    groomed: bool,
    icy: bool,
    powder: bool,
    moguls: bool,
    granular: bool,
    thin_cover: bool,
    packed: bool,
    wet: bool,
    date_reported: String,
}

impl From<ReportSummaryRow> for ReportSummary {
    fn from(row: ReportSummaryRow) -> Self {
        Self {
            report_id: row.report_id,
            run_id: row.run_id,
            run_name: row.run_name,
            area_id: row.area_id,
            zone_name: row.zone_name,
            resort_id: row.resort_id,
            resort_name: row.resort_name,
            user_id: row.user_id,
            username: row.username,
            description: row.description,
            conditions: ConditionFlags {
                obstacle: row.obstacle,
                groomed: row.groomed,
                icy: row.icy,
                powder: row.powder,
                moguls: row.moguls,
                granular: row.granular,
                thin_cover: row.thin_cover,
                packed: row.packed,
                wet: row.wet,
            },
            date_reported: row.date_reported,
        }
    }
}

/// Which reports a summary listing covers.
#[derive(Debug, Clone, Copy)]
enum ReportScope<'a> {
    Selection(&'a FilterSelection),
    Author(i64),
    Latest(i64),
}

/// Lists runs matching every present selector.
///
/// Ordered by zone name, then run name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_run_summaries(
    conn: &mut SqliteConnection,
    selection: &FilterSelection,
) -> Result<Vec<RunSummary>, PersistenceError> {
    debug!(?selection, "Listing runs");

    let mut query = runs::table
        .inner_join(areas::table.inner_join(resorts::table))
        .select((
            runs::run_id,
            runs::run_name,
            runs::difficulty,
            runs::is_open,
            runs::is_terrain_park,
            runs::backcountry_access,
            runs::bootpack_req,
            areas::area_id,
            areas::zone_name,
            areas::base_area,
            resorts::resort_id,
            resorts::resort_name,
        ))
        .into_boxed();

    if let Some(resort_id) = selection.resort_id {
        query = query.filter(resorts::resort_id.eq(resort_id));
    }
    if let Some(area_id) = selection.area_id {
        query = query.filter(areas::area_id.eq(area_id));
    }
    if let Some(run_id) = selection.run_id {
        query = query.filter(runs::run_id.eq(run_id));
    }

    let rows: Vec<RunSummaryRow> = query
        .order((areas::zone_name.asc(), runs::run_name.asc(), runs::run_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(RunSummary::from).collect())
}

/// Lists reports matching every present selector, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_report_summaries(
    conn: &mut SqliteConnection,
    selection: &FilterSelection,
) -> Result<Vec<ReportSummary>, PersistenceError> {
    debug!(?selection, "Listing reports");
    load_report_summaries(conn, ReportScope::Selection(selection))
}

/// Lists the most recent reports across all runs.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_recent_reports(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<ReportSummary>, PersistenceError> {
    load_report_summaries(conn, ReportScope::Latest(limit))
}

/// Lists every report filed by one user, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reports_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<ReportSummary>, PersistenceError> {
    load_report_summaries(conn, ReportScope::Author(user_id))
}

fn load_report_summaries(
    conn: &mut SqliteConnection,
    scope: ReportScope<'_>,
) -> Result<Vec<ReportSummary>, PersistenceError> {
    let mut query = reports::table
        .inner_join(runs::table.inner_join(areas::table.inner_join(resorts::table)))
        .inner_join(users::table)
        .select((
            reports::report_id,
            runs::run_id,
            runs::run_name,
            areas::area_id,
            areas::zone_name,
            resorts::resort_id,
            resorts::resort_name,
            users::user_id,
            users::username,
            reports::description,
            reports::obstacle,
            reports::groomed,
            reports::icy,
            reports::powder,
            reports::moguls,
            reports::granular,
            reports::thin_cover,
            reports::packed,
            reports::wet,
            reports::date_reported,
        ))
        .order((reports::date_reported.desc(), reports::report_id.desc()))
        .into_boxed();

    match scope {
        ReportScope::Selection(selection) => {
            if let Some(resort_id) = selection.resort_id {
                query = query.filter(resorts::resort_id.eq(resort_id));
            }
            if let Some(area_id) = selection.area_id {
                query = query.filter(areas::area_id.eq(area_id));
            }
            if let Some(run_id) = selection.run_id {
                query = query.filter(runs::run_id.eq(run_id));
            }
        }
        ReportScope::Author(user_id) => {
            query = query.filter(reports::user_id.eq(user_id));
        }
        ReportScope::Latest(limit) => {
            query = query.limit(limit);
        }
    }

    let rows: Vec<ReportSummaryRow> = query.load(conn)?;

    Ok(rows.into_iter().map(ReportSummary::from).collect())
}
