// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV catalog loading.

use std::path::{Path, PathBuf};

use slopesense_domain::FilterSelection;

use crate::{
    SeedError, create_report, load_catalog_dir, parse_areas, parse_resorts, parse_runs,
    seed_catalog, seed_flag,
};

use super::helpers::{create_report_request, create_test_persistence, create_test_user};

const RESORTS: &str = "resort_name,city,state,total_acres,canyon_name,website,ski_patrol_phone,night_skiing\n\
Alta,Alta,UT,2614,Little Cottonwood Canyon,https://www.alta.com,801-359-1078,no\n";
const AREAS: &str = "resort_id,base_area,area_name\n1,Wildcat Base,Wildcat\n";

fn repo_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// A scratch seed directory removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "slopesense-seed-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    fn write(&self, file: &str, contents: &str) {
        std::fs::write(self.0.join(file), contents).unwrap();
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_seed_flag_accepts_the_truthy_set() {
    for value in ["true", "TRUE", "1", "t", "yes", "Y", " y "] {
        assert!(seed_flag(Some(value)), "{value} should be true");
    }
    for value in ["false", "0", "no", "on", "", "maybe"] {
        assert!(!seed_flag(Some(value)), "{value} should be false");
    }
    assert!(!seed_flag(None));
}

#[test]
fn test_parse_resorts_reads_every_column() {
    let resorts = parse_resorts("resorts.csv", RESORTS.as_bytes()).unwrap();

    assert_eq!(resorts.len(), 1);
    let alta = &resorts[0];
    assert_eq!(alta.resort_name, "Alta");
    assert_eq!(alta.total_acres, Some(2614));
    assert_eq!(alta.canyon_name.as_deref(), Some("Little Cottonwood Canyon"));
    assert_eq!(alta.ski_patrol_phone.as_deref(), Some("801-359-1078"));
    assert!(!alta.has_night_skiing);
}

#[test]
fn test_parse_resorts_empty_and_non_numeric_cells_are_absent() {
    let csv = "resort_name,city,total_acres,night_skiing\nBrighton,,lots,Yes\n";
    let resorts = parse_resorts("resorts.csv", csv.as_bytes()).unwrap();

    assert!(resorts[0].city.is_none());
    assert!(resorts[0].total_acres.is_none());
    assert!(resorts[0].has_night_skiing);
}

#[test]
fn test_parse_resorts_requires_name_column() {
    let err = parse_resorts("resorts.csv", "city,state\nAlta,UT\n".as_bytes()).unwrap_err();
    assert!(matches!(err, SeedError::MissingColumns { .. }));
}

#[test]
fn test_parse_areas_rejects_bad_parent_index_with_row() {
    let csv = "resort_id,base_area,area_name\n1,Base,Upper\nzero,Base,Lower\n";
    let err = parse_areas("areas.csv", csv.as_bytes()).unwrap_err();

    match err {
        SeedError::InvalidRow { file, row, .. } => {
            assert_eq!(file, "areas.csv");
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_runs_reads_flags() {
    let csv = "area_id,run_name,difficulty,is_open,is_terrain_park,backcountry_access,bootpack_req\n\
1,High Rustler,Double Black,t,no,yes,y\n";
    let runs = parse_runs("alta-runs.csv", csv.as_bytes()).unwrap();

    assert_eq!(runs[0].area_index, 1);
    assert_eq!(runs[0].run_name, "High Rustler");
    assert!(runs[0].is_open);
    assert!(!runs[0].is_terrain_park);
    assert!(runs[0].backcountry_access);
    assert!(runs[0].bootpack_req);
}

#[test]
fn test_load_repository_seed_data() {
    let seed = load_catalog_dir(&repo_data_dir()).unwrap();

    assert_eq!(seed.resorts.len(), 3);
    assert_eq!(seed.areas.len(), 7);
    assert_eq!(seed.runs.len(), 15);
    // Run files are read in name order: beaver, snowbird, sundance.
    assert_eq!(seed.runs[0].run_name, "Harry's Dream");
    assert_eq!(seed.runs[14].run_name, "Flying Mule");
}

#[test]
fn test_seed_catalog_populates_an_empty_store() {
    let mut persistence = create_test_persistence();

    let counts = seed_catalog(&mut persistence, &repo_data_dir())
        .unwrap()
        .unwrap();

    assert_eq!((counts.resorts, counts.areas, counts.runs), (3, 7, 15));
    assert_eq!(persistence.list_resorts().unwrap().len(), 3);
    let runs = persistence
        .list_run_summaries(&FilterSelection::default())
        .unwrap();
    assert_eq!(runs.len(), 15);

    let baldy = runs.iter().find(|r| r.run_name == "Baldy Chutes").unwrap();
    assert_eq!(baldy.resort_name, "Snowbird");
    assert_eq!(baldy.zone_name.as_deref(), Some("Mineral Basin"));
    assert!(baldy.bootpack_req);
}

#[test]
fn test_reseeding_keeps_reports_and_favourites() {
    let mut persistence = create_test_persistence();
    seed_catalog(&mut persistence, &repo_data_dir()).unwrap();

    let runs = persistence
        .list_run_summaries(&FilterSelection::default())
        .unwrap();
    let baldy = runs.iter().find(|r| r.run_name == "Baldy Chutes").unwrap();
    let snowbird_id = persistence.get_run_lineage(baldy.run_id).unwrap().unwrap().0;
    let user_id = create_test_user(&mut persistence, "restart", snowbird_id);
    create_report(
        &mut persistence,
        user_id,
        user_id,
        &create_report_request(baldy.run_id),
    )
    .unwrap();

    // A restart with the same seed directory configured.
    let second = seed_catalog(&mut persistence, &repo_data_dir()).unwrap();

    assert!(second.is_none());
    assert_eq!(persistence.count_reports().unwrap(), 1);
    assert_eq!(persistence.list_reports_for_user(user_id).unwrap().len(), 1);
    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.fav_resort, Some(snowbird_id));
}

#[test]
fn test_legacy_area_file_name_is_accepted() {
    let dir = ScratchDir::new("legacy");
    dir.write("resorts.csv", RESORTS);
    dir.write("area.csv", AREAS);
    dir.write(
        "alta-runs.csv",
        "area_id,run_name\n1,Wildcat Face\n",
    );

    let seed = load_catalog_dir(&dir.0).unwrap();
    assert_eq!(seed.areas.len(), 1);
    assert_eq!(seed.runs.len(), 1);
}

#[test]
fn test_orphan_run_is_reported_with_file_and_row() {
    let dir = ScratchDir::new("orphan");
    dir.write("resorts.csv", RESORTS);
    dir.write("areas.csv", AREAS);
    dir.write("a-runs.csv", "area_id,run_name\n1,Wildcat Face\n");
    dir.write("b-runs.csv", "area_id,run_name\n1,Punch Bowl\n2,Nowhere\n");

    let err = load_catalog_dir(&dir.0).unwrap_err();
    match err {
        SeedError::InvalidRow { file, row, .. } => {
            assert_eq!(file, "b-runs.csv");
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failed_seed_leaves_store_untouched() {
    let mut persistence = create_test_persistence();

    let dir = ScratchDir::new("untouched");
    dir.write("resorts.csv", RESORTS);
    dir.write("areas.csv", "resort_id,base_area,area_name\n7,Base,Nowhere\n");

    assert!(seed_catalog(&mut persistence, &dir.0).is_err());
    assert!(persistence.list_resorts().unwrap().is_empty());
}

#[test]
fn test_missing_resorts_file_is_reported() {
    let dir = ScratchDir::new("missing");
    let err = load_catalog_dir(&dir.0).unwrap_err();
    assert!(matches!(err, SeedError::MissingFile(_)));
}
