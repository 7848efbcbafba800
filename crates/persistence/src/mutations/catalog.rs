// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terrain catalog administration.
//!
//! Request handlers never call into this module. It exists for seeding
//! at provisioning time and for test fixtures.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slopesense_domain::{CatalogSeed, NewArea, NewResort, NewRun};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::CatalogCounts;
use crate::diesel_schema::{areas, resorts, runs};
use crate::error::PersistenceError;

/// Inserts a resort.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_resort(
    conn: &mut SqliteConnection,
    resort: &NewResort,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(resorts::table)
        .values((
            resorts::resort_name.eq(&resort.resort_name),
            resorts::city.eq(resort.city.as_deref()),
            resorts::state.eq(resort.state.as_deref()),
            resorts::website.eq(resort.website.as_deref()),
            resorts::total_acres.eq(resort.total_acres),
            resorts::canyon_name.eq(resort.canyon_name.as_deref()),
            resorts::ski_patrol_phone.eq(resort.ski_patrol_phone.as_deref()),
            resorts::has_night_skiing.eq(resort.has_night_skiing),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Inserts an area under an existing resort.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the resort does not
/// exist, or another error if the insert fails.
pub fn insert_area(conn: &mut SqliteConnection, area: &NewArea) -> Result<i64, PersistenceError> {
    diesel::insert_into(areas::table)
        .values((
            areas::resort_id.eq(area.resort_id),
            areas::base_area.eq(area.base_area.as_deref()),
            areas::zone_name.eq(area.zone_name.as_deref()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Inserts a run under an existing area.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the area does not
/// exist, or another error if the insert fails.
pub fn insert_run(conn: &mut SqliteConnection, run: &NewRun) -> Result<i64, PersistenceError> {
    diesel::insert_into(runs::table)
        .values((
            runs::area_id.eq(run.area_id),
            runs::run_name.eq(&run.run_name),
            runs::difficulty.eq(run.difficulty.as_deref()),
            runs::is_open.eq(run.is_open),
            runs::is_terrain_park.eq(run.is_terrain_park),
            runs::backcountry_access.eq(run.backcountry_access),
            runs::bootpack_req.eq(run.bootpack_req),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Deletes a resort. Its areas, runs, and their reports cascade;
/// users who favorited it keep their account with no favorite.
///
/// Returns `false` if no such resort existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_resort(conn: &mut SqliteConnection, resort_id: i64) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::delete(resorts::table)
        .filter(resorts::resort_id.eq(resort_id))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(resort_id, "Deleted resort");
    }
    Ok(rows_affected > 0)
}

/// Replaces the whole catalog with `seed` in a single transaction.
///
/// Existing runs, areas, and resorts are cleared first, which cascades to
/// every stored report. Seed rows reference their parent by 1-based
/// position, translated here to the ids generated on insert.
///
/// # Errors
///
/// Returns `PersistenceError::InitializationError` if a seed row points at
/// a parent position that does not exist. Nothing is written in that case.
pub fn replace_catalog(
    conn: &mut SqliteConnection,
    seed: &CatalogSeed,
) -> Result<CatalogCounts, PersistenceError> {
    if let Some(position) = seed.first_orphan_area() {
        return Err(PersistenceError::InitializationError(format!(
            "Area {position} references a resort that is not in the seed"
        )));
    }
    if let Some(position) = seed.first_orphan_run() {
        return Err(PersistenceError::InitializationError(format!(
            "Run {position} references an area that is not in the seed"
        )));
    }

    conn.transaction::<CatalogCounts, PersistenceError, _>(|conn| {
        diesel::delete(runs::table).execute(conn)?;
        diesel::delete(areas::table).execute(conn)?;
        diesel::delete(resorts::table).execute(conn)?;

        let mut resort_ids: Vec<i64> = Vec::with_capacity(seed.resorts.len());
        for resort in &seed.resorts {
            resort_ids.push(insert_resort(conn, resort)?);
        }

        let mut area_ids: Vec<i64> = Vec::with_capacity(seed.areas.len());
        for area in &seed.areas {
            let area_id: i64 = insert_area(
                conn,
                &NewArea {
                    resort_id: resolve_parent(&resort_ids, area.resort_index)?,
                    base_area: area.base_area.clone(),
                    zone_name: area.zone_name.clone(),
                },
            )?;
            area_ids.push(area_id);
        }

        for run in &seed.runs {
            insert_run(
                conn,
                &NewRun {
                    area_id: resolve_parent(&area_ids, run.area_index)?,
                    run_name: run.run_name.clone(),
                    difficulty: run.difficulty.clone(),
                    is_open: run.is_open,
                    is_terrain_park: run.is_terrain_park,
                    backcountry_access: run.backcountry_access,
                    bootpack_req: run.bootpack_req,
                },
            )?;
        }

        let counts = CatalogCounts {
            resorts: resort_ids.len(),
            areas: area_ids.len(),
            runs: seed.runs.len(),
        };
        info!(
            resorts = counts.resorts,
            areas = counts.areas,
            runs = counts.runs,
            "Replaced terrain catalog"
        );
        Ok(counts)
    })
}

/// Maps a 1-based seed position to the id generated for that parent.
fn resolve_parent(ids: &[i64], position: usize) -> Result<i64, PersistenceError> {
    position
        .checked_sub(1)
        .and_then(|idx| ids.get(idx))
        .copied()
        .ok_or_else(|| {
            PersistenceError::InitializationError(format!("Seed parent {position} does not exist"))
        })
}
