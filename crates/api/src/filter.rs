// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cascading resort → area → run filter resolution.
//!
//! The slopes and reports pages share one algorithm and differ only in
//! which rows they list. [`Listing`] is that seam.
//!
//! Resolution:
//!
//! 1. Backfill missing ancestors of the deepest selector by joining upward
//!    (run → area → resort), so a deep link populates every dropdown. A
//!    child that belongs to a different parent is dropped.
//! 2. Always load the resort dropdown.
//! 3. Load the area dropdown only when a resort is selected.
//! 4. Load the run dropdown only when an area is selected.
//! 5. List rows constrained by every present selector.
//!
//! Absent selectors never fail; they widen the listing. Only a storage
//! fault is an error.

use slopesense_domain::{Area, FilterSelection, ReportSummary, Resort, Run, RunSummary};
use slopesense_persistence::{Persistence, PersistenceError};
use tracing::{debug, error};

use crate::error::ApiError;

/// A listing the resolver can drive.
pub trait Listing {
    /// One row of the listing.
    type Row;

    /// Loads rows matching every present selector, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn load(
        persistence: &mut Persistence,
        selection: &FilterSelection,
    ) -> Result<Vec<Self::Row>, PersistenceError>;
}

/// Runs with their area and resort, ordered by zone then run name.
pub struct SlopeListing;

impl Listing for SlopeListing {
    type Row = RunSummary;

    fn load(
        persistence: &mut Persistence,
        selection: &FilterSelection,
    ) -> Result<Vec<RunSummary>, PersistenceError> {
        persistence.list_run_summaries(selection)
    }
}

/// Reports with their run, area, resort and author, newest first.
pub struct ReportListing;

impl Listing for ReportListing {
    type Row = ReportSummary;

    fn load(
        persistence: &mut Persistence,
        selection: &FilterSelection,
    ) -> Result<Vec<ReportSummary>, PersistenceError> {
        persistence.list_report_summaries(selection)
    }
}

/// The outcome of resolving a filter: the effective selection, the three
/// dropdowns, and the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter<T> {
    pub selection: FilterSelection,
    pub resorts: Vec<Resort>,
    pub areas: Vec<Area>,
    pub runs: Vec<Run>,
    pub rows: Vec<T>,
}

/// Resolves a partial selection and loads the listing `L`.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn resolve_filter<L: Listing>(
    persistence: &mut Persistence,
    selection: FilterSelection,
) -> Result<ResolvedFilter<L::Row>, ApiError> {
    let selection: FilterSelection = backfill_lineage(persistence, selection)?;

    let resorts: Vec<Resort> = persistence.list_resorts().map_err(listing_unavailable)?;

    let areas: Vec<Area> = match selection.resort_id {
        Some(resort_id) => persistence
            .list_areas_for_resort(resort_id)
            .map_err(listing_unavailable)?,
        None => Vec::new(),
    };

    let runs: Vec<Run> = match selection.area_id {
        Some(area_id) => persistence
            .list_runs_for_area(area_id)
            .map_err(listing_unavailable)?,
        None => Vec::new(),
    };

    let rows: Vec<L::Row> = L::load(persistence, &selection).map_err(listing_unavailable)?;

    Ok(ResolvedFilter {
        selection,
        resorts,
        areas,
        runs,
        rows,
    })
}

/// Fills in the resort and area above the deepest selector and drops child
/// selectors that belong to a different parent.
///
/// When a run or area disagrees with a selector above it, the less specific
/// selector wins and the child is cleared along with anything beneath it.
/// This is the usual path after a parent dropdown changes and the form is
/// resubmitted with the old child value. An unknown run or area leaves the
/// selection unchanged, which lists nothing.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn backfill_lineage(
    persistence: &mut Persistence,
    mut selection: FilterSelection,
) -> Result<FilterSelection, ApiError> {
    if let Some(run_id) = selection.run_id {
        let lineage: Option<(i64, i64)> = persistence
            .get_run_lineage(run_id)
            .map_err(listing_unavailable)?;
        if let Some((resort_id, area_id)) = lineage {
            let area_matches: bool = selection.area_id.is_none_or(|id| id == area_id);
            let resort_matches: bool = selection.resort_id.is_none_or(|id| id == resort_id);
            if area_matches && resort_matches {
                selection.area_id = Some(area_id);
                selection.resort_id = Some(resort_id);
            } else {
                debug!(run_id, "Dropping run outside the selected area");
                selection.run_id = None;
            }
        }
    }

    if let Some(area_id) = selection.area_id {
        let owner: Option<i64> = persistence
            .get_area_resort(area_id)
            .map_err(listing_unavailable)?;
        match (owner, selection.resort_id) {
            (Some(owner), None) => selection.resort_id = Some(owner),
            (Some(owner), Some(resort_id)) if owner != resort_id => {
                debug!(area_id, resort_id, "Dropping area outside the selected resort");
                selection.area_id = None;
                selection.run_id = None;
            }
            _ => {}
        }
    }

    Ok(selection)
}

fn listing_unavailable(err: PersistenceError) -> ApiError {
    error!(error = %err, "Listing query failed");
    ApiError::Internal {
        message: format!("Listing unavailable: {err}"),
    }
}
