// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terrain catalog queries: resorts, areas, runs, and the upward
//! lineage lookups used to backfill a partial filter selection.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slopesense_domain::{Area, Resort, Run};
use tracing::debug;

use crate::diesel_schema::{areas, resorts, runs};
use crate::error::PersistenceError;

/// Diesel Queryable struct for resort rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = resorts)]
pub(crate) struct ResortRow {
    resort_id: i64,
    resort_name: String,
    city: Option<String>,
    state: Option<String>,
    website: Option<String>,
    total_acres: Option<i32>,
    canyon_name: Option<String>,
    ski_patrol_phone: Option<String>,
    has_night_skiing: bool,
    date_created: String,
}

impl From<ResortRow> for Resort {
    fn from(row: ResortRow) -> Self {
        Self {
            resort_id: row.resort_id,
            resort_name: row.resort_name,
            city: row.city,
            state: row.state,
            website: row.website,
            total_acres: row.total_acres,
            canyon_name: row.canyon_name,
            ski_patrol_phone: row.ski_patrol_phone,
            has_night_skiing: row.has_night_skiing,
            date_created: row.date_created,
        }
    }
}

/// Diesel Queryable struct for area rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = areas)]
pub(crate) struct AreaRow {
    area_id: i64,
    resort_id: i64,
    base_area: Option<String>,
    zone_name: Option<String>,
    date_created: String,
}

impl From<AreaRow> for Area {
    fn from(row: AreaRow) -> Self {
        Self {
            area_id: row.area_id,
            resort_id: row.resort_id,
            base_area: row.base_area,
            zone_name: row.zone_name,
            date_created: row.date_created,
        }
    }
}

/// Diesel Queryable struct for run rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = runs)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct RunRow {
    run_id: i64,
    area_id: i64,
    run_name: String,
    difficulty: Option<String>,
    is_open: bool,
    is_terrain_park: bool,
    backcountry_access: bool,
    bootpack_req: bool,
    date_created: String,
}

impl From<RunRow> for Run {
    fn from(row: RunRow) -> Self {
        Self {
            run_id: row.run_id,
            area_id: row.area_id,
            run_name: row.run_name,
            difficulty: row.difficulty,
            is_open: row.is_open,
            is_terrain_park: row.is_terrain_park,
            backcountry_access: row.backcountry_access,
            bootpack_req: row.bootpack_req,
            date_created: row.date_created,
        }
    }
}

/// Lists every resort, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_resorts(conn: &mut SqliteConnection) -> Result<Vec<Resort>, PersistenceError> {
    let rows: Vec<ResortRow> = resorts::table
        .select(ResortRow::as_select())
        .order((resorts::resort_name.asc(), resorts::resort_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(Resort::from).collect())
}

/// Retrieves a resort by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the resort does not exist.
pub fn get_resort(
    conn: &mut SqliteConnection,
    resort_id: i64,
) -> Result<Option<Resort>, PersistenceError> {
    debug!(resort_id, "Looking up resort");

    let result: Result<ResortRow, diesel::result::Error> = resorts::table
        .filter(resorts::resort_id.eq(resort_id))
        .select(ResortRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Resort::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the areas of one resort, ordered by zone name.
///
/// An unknown resort yields an empty list.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_areas_for_resort(
    conn: &mut SqliteConnection,
    resort_id: i64,
) -> Result<Vec<Area>, PersistenceError> {
    let rows: Vec<AreaRow> = areas::table
        .filter(areas::resort_id.eq(resort_id))
        .select(AreaRow::as_select())
        .order((areas::zone_name.asc(), areas::area_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(Area::from).collect())
}

/// Lists the runs of one area, ordered by run name.
///
/// An unknown area yields an empty list.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_runs_for_area(
    conn: &mut SqliteConnection,
    area_id: i64,
) -> Result<Vec<Run>, PersistenceError> {
    let rows: Vec<RunRow> = runs::table
        .filter(runs::area_id.eq(area_id))
        .select(RunRow::as_select())
        .order((runs::run_name.asc(), runs::run_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(Run::from).collect())
}

/// Retrieves a run by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the run does not exist.
pub fn get_run(conn: &mut SqliteConnection, run_id: i64) -> Result<Option<Run>, PersistenceError> {
    let row: Option<RunRow> = runs::table
        .filter(runs::run_id.eq(run_id))
        .select(RunRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Run::from))
}

/// Resolves a run's ancestors by joining upward through its area.
///
/// Returns `(resort_id, area_id)`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the run does not exist.
pub fn get_run_lineage(
    conn: &mut SqliteConnection,
    run_id: i64,
) -> Result<Option<(i64, i64)>, PersistenceError> {
    debug!(run_id, "Resolving run lineage");

    Ok(runs::table
        .inner_join(areas::table)
        .filter(runs::run_id.eq(run_id))
        .select((areas::resort_id, areas::area_id))
        .first::<(i64, i64)>(conn)
        .optional()?)
}

/// Resolves the resort that owns an area.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the area does not exist.
pub fn get_area_resort(
    conn: &mut SqliteConnection,
    area_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(areas::table
        .filter(areas::area_id.eq(area_id))
        .select(areas::resort_id)
        .first::<i64>(conn)
        .optional()?)
}
