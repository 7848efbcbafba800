// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CatalogSeed, NewResort, SeedArea, SeedRun};

fn seed_area(resort_index: usize) -> SeedArea {
    SeedArea {
        resort_index,
        base_area: None,
        zone_name: Some(String::from("Zone")),
    }
}

fn seed_run(area_index: usize) -> SeedRun {
    SeedRun {
        area_index,
        run_name: String::from("Run"),
        difficulty: None,
        is_open: true,
        is_terrain_park: false,
        backcountry_access: false,
        bootpack_req: false,
    }
}

#[test]
fn test_consistent_seed_has_no_orphans() {
    let seed: CatalogSeed = CatalogSeed {
        resorts: vec![NewResort::default(), NewResort::default()],
        areas: vec![seed_area(1), seed_area(2)],
        runs: vec![seed_run(2), seed_run(1)],
    };
    assert_eq!(seed.first_orphan_area(), None);
    assert_eq!(seed.first_orphan_run(), None);
}

#[test]
fn test_orphans_are_reported_by_position() {
    let seed: CatalogSeed = CatalogSeed {
        resorts: vec![NewResort::default()],
        areas: vec![seed_area(1), seed_area(3)],
        runs: vec![seed_run(1), seed_run(0)],
    };
    assert_eq!(seed.first_orphan_area(), Some(2));
    assert_eq!(seed.first_orphan_run(), Some(2));
}
