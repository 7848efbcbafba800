// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slopesense_domain::NewReport;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Inserts a condition report.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the run or user does
/// not exist, or another error if the insert fails.
pub fn create_report(
    conn: &mut SqliteConnection,
    report: &NewReport,
) -> Result<i64, PersistenceError> {
    let flags = report.conditions;

    diesel::insert_into(reports::table)
        .values((
            reports::run_id.eq(report.run_id),
            reports::user_id.eq(report.user_id),
            reports::description.eq(report.description.as_deref()),
            reports::obstacle.eq(flags.obstacle),
            reports::groomed.eq(flags.groomed),
            reports::icy.eq(flags.icy),
            reports::powder.eq(flags.powder),
            reports::moguls.eq(flags.moguls),
            reports::granular.eq(flags.granular),
            reports::thin_cover.eq(flags.thin_cover),
            reports::packed.eq(flags.packed),
            reports::wet.eq(flags.wet),
            reports::date_reported.eq(&report.date_reported),
        ))
        .execute(conn)?;

    let report_id: i64 = conn.get_last_insert_rowid()?;

    info!(report_id, run_id = report.run_id, user_id = report.user_id, "Created report");
    Ok(report_id)
}

/// Deletes a report.
///
/// Returns `false` if no such report existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_report(conn: &mut SqliteConnection, report_id: i64) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::delete(reports::table)
        .filter(reports::report_id.eq(report_id))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(report_id, "Deleted report");
    }
    Ok(rows_affected > 0)
}
