// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cascading filter resolution and deep links.

use slopesense_domain::{FilterSelection, ReportSummary, RunSummary};

use crate::{
    ApiError, FilterRequest, ReportListing, ResolvedFilter, SlopeListing, create_report,
    parse_filter, resolve_filter,
};

use super::helpers::{
    Catalog, create_report_request, create_test_catalog, create_test_persistence,
    create_test_user,
};

fn select(resort_id: Option<i64>, area_id: Option<i64>, run_id: Option<i64>) -> FilterSelection {
    FilterSelection {
        resort_id,
        area_id,
        run_id,
    }
}

fn run_ids(rows: &[RunSummary]) -> Vec<i64> {
    let mut ids: Vec<i64> = rows.iter().map(|r| r.run_id).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn test_empty_selection_lists_everything_with_only_resort_dropdown() {
    let mut persistence = create_test_persistence();
    create_test_catalog(&mut persistence);

    let resolved: ResolvedFilter<RunSummary> =
        resolve_filter::<SlopeListing>(&mut persistence, FilterSelection::default()).unwrap();

    assert_eq!(resolved.resorts.len(), 2);
    assert!(resolved.areas.is_empty());
    assert!(resolved.runs.is_empty());
    assert_eq!(resolved.rows.len(), 4);
}

#[test]
fn test_resort_selection_loads_area_dropdown() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved =
        resolve_filter::<SlopeListing>(&mut persistence, select(Some(catalog.snowbird), None, None))
            .unwrap();

    assert_eq!(resolved.areas.len(), 2);
    assert!(resolved.runs.is_empty());
    assert_eq!(
        run_ids(&resolved.rows),
        vec![catalog.chip_run, catalog.regulator, catalog.baldy_chutes]
    );
}

#[test]
fn test_run_deep_link_backfills_resort_and_area() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved =
        resolve_filter::<SlopeListing>(&mut persistence, select(None, None, Some(catalog.regulator)))
            .unwrap();

    assert_eq!(
        resolved.selection,
        select(
            Some(catalog.snowbird),
            Some(catalog.snowbird_center),
            Some(catalog.regulator)
        )
    );
    assert_eq!(resolved.areas.len(), 2);
    assert_eq!(resolved.runs.len(), 2);
    assert_eq!(run_ids(&resolved.rows), vec![catalog.regulator]);
}

#[test]
fn test_area_deep_link_backfills_resort() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved =
        resolve_filter::<SlopeListing>(&mut persistence, select(None, Some(catalog.wildcat), None))
            .unwrap();

    assert_eq!(resolved.selection.resort_id, Some(catalog.alta));
    assert_eq!(resolved.areas.len(), 1);
    assert_eq!(run_ids(&resolved.rows), vec![catalog.wildcat_face]);
}

#[test]
fn test_unknown_run_lists_nothing() {
    let mut persistence = create_test_persistence();
    create_test_catalog(&mut persistence);

    let resolved =
        resolve_filter::<SlopeListing>(&mut persistence, select(None, None, Some(404))).unwrap();

    assert_eq!(resolved.selection, select(None, None, Some(404)));
    assert!(resolved.rows.is_empty());
}

#[test]
fn test_area_from_another_resort_is_dropped() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    // Resort changed to Alta while Mineral Basin was still selected.
    let resolved = resolve_filter::<SlopeListing>(
        &mut persistence,
        select(Some(catalog.alta), Some(catalog.mineral_basin), None),
    )
    .unwrap();

    assert_eq!(resolved.selection, select(Some(catalog.alta), None, None));
    assert_eq!(resolved.areas.len(), 1);
    assert!(resolved.runs.is_empty());
    assert_eq!(run_ids(&resolved.rows), vec![catalog.wildcat_face]);
}

#[test]
fn test_run_from_another_area_is_dropped() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved = resolve_filter::<SlopeListing>(
        &mut persistence,
        select(
            Some(catalog.snowbird),
            Some(catalog.snowbird_center),
            Some(catalog.baldy_chutes),
        ),
    )
    .unwrap();

    assert_eq!(
        resolved.selection,
        select(Some(catalog.snowbird), Some(catalog.snowbird_center), None)
    );
    let dropdown: Vec<i64> = resolved.runs.iter().map(|r| r.run_id).collect();
    assert!(!dropdown.contains(&catalog.baldy_chutes));
    assert_eq!(
        run_ids(&resolved.rows),
        vec![catalog.chip_run, catalog.regulator]
    );
}

#[test]
fn test_stale_area_and_run_both_give_way_to_resort() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved = resolve_filter::<SlopeListing>(
        &mut persistence,
        select(
            Some(catalog.alta),
            Some(catalog.mineral_basin),
            Some(catalog.baldy_chutes),
        ),
    )
    .unwrap();

    assert_eq!(resolved.selection, select(Some(catalog.alta), None, None));
    assert!(resolved.runs.is_empty());
    assert!(resolved.rows.iter().all(|r| r.resort_id == catalog.alta));
}

#[test]
fn test_run_deep_link_with_matching_area_backfills_resort() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);

    let resolved = resolve_filter::<SlopeListing>(
        &mut persistence,
        select(None, Some(catalog.mineral_basin), Some(catalog.baldy_chutes)),
    )
    .unwrap();

    assert_eq!(
        resolved.selection,
        select(
            Some(catalog.snowbird),
            Some(catalog.mineral_basin),
            Some(catalog.baldy_chutes)
        )
    );
    assert_eq!(run_ids(&resolved.rows), vec![catalog.baldy_chutes]);
}

#[test]
fn test_narrowing_never_adds_rows() {
    let mut persistence = create_test_persistence();
    let catalog: Catalog = create_test_catalog(&mut persistence);

    let chain = [
        select(None, None, None),
        select(Some(catalog.snowbird), None, None),
        select(Some(catalog.snowbird), Some(catalog.snowbird_center), None),
        select(
            Some(catalog.snowbird),
            Some(catalog.snowbird_center),
            Some(catalog.chip_run),
        ),
    ];

    let mut previous: Option<Vec<i64>> = None;
    for selection in chain {
        let rows = resolve_filter::<SlopeListing>(&mut persistence, selection)
            .unwrap()
            .rows;
        for row in &rows {
            assert!(selection.resort_id.is_none_or(|id| id == row.resort_id));
            assert!(selection.area_id.is_none_or(|id| id == row.area_id));
            assert!(selection.run_id.is_none_or(|id| id == row.run_id));
        }
        let ids = run_ids(&rows);
        if let Some(wider) = &previous {
            assert!(ids.iter().all(|id| wider.contains(id)));
        }
        previous = Some(ids);
    }
}

#[test]
fn test_report_listing_follows_the_same_selection() {
    let mut persistence = create_test_persistence();
    let catalog = create_test_catalog(&mut persistence);
    let user_id = create_test_user(&mut persistence, "alice", catalog.snowbird);
    for run_id in [catalog.chip_run, catalog.baldy_chutes, catalog.wildcat_face] {
        create_report(
            &mut persistence,
            user_id,
            user_id,
            &create_report_request(run_id),
        )
        .unwrap();
    }

    let all: ResolvedFilter<ReportSummary> =
        resolve_filter::<ReportListing>(&mut persistence, FilterSelection::default()).unwrap();
    assert_eq!(all.rows.len(), 3);

    let snowbird =
        resolve_filter::<ReportListing>(&mut persistence, select(Some(catalog.snowbird), None, None))
            .unwrap();
    assert_eq!(snowbird.rows.len(), 2);
    assert!(snowbird.rows.iter().all(|r| r.resort_id == catalog.snowbird));

    let deep_link = resolve_filter::<ReportListing>(
        &mut persistence,
        select(None, None, Some(catalog.baldy_chutes)),
    )
    .unwrap();
    assert_eq!(deep_link.selection.area_id, Some(catalog.mineral_basin));
    assert_eq!(deep_link.rows.len(), 1);
    assert_eq!(deep_link.rows[0].username, "alice");
}

#[test]
fn test_parse_filter_treats_empty_values_as_absent() {
    let request = FilterRequest {
        resort_id: Some(String::from("3")),
        area_id: Some(String::new()),
        run_id: None,
    };

    assert_eq!(parse_filter(&request).unwrap(), select(Some(3), None, None));
}

#[test]
fn test_parse_filter_rejects_non_numeric_identifier() {
    let request = FilterRequest {
        resort_id: Some(String::from("snowbird")),
        ..FilterRequest::default()
    };

    assert!(matches!(
        parse_filter(&request).unwrap_err(),
        ApiError::InvalidInput { .. }
    ));
}
