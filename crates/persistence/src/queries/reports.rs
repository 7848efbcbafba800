// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slopesense_domain::{ConditionFlags, Report};

use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Diesel Queryable struct for report rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reports)]
#[allow(clippy::struct_excessive_bools)]
struct ReportRow {
    report_id: i64,
    run_id: i64,
    user_id: i64,
    description: Option<String>,
    image_url: Option<String>,
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

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Self {
            report_id: row.report_id,
            run_id: row.run_id,
            user_id: row.user_id,
            description: row.description,
            image_url: row.image_url,
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

/// Retrieves a report by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the report does not exist.
pub fn get_report(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Option<Report>, PersistenceError> {
    let row: Option<ReportRow> = reports::table
        .filter(reports::report_id.eq(report_id))
        .select(ReportRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Report::from))
}

/// Counts all reports.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_reports(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(reports::table.count().get_result(conn)?)
}
