// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use slopesense_domain::{ConditionFlags, NewArea, NewReport, NewResort, NewRun, UserProfile};
use time::macros::date;

use crate::Persistence;

/// Ids of the fixture catalog created by [`seed_test_catalog`].
pub struct TestCatalog {
    pub snowbird: i64,
    pub alta: i64,
    pub snowbird_center: i64,
    pub mineral_basin: i64,
    pub alta_wildcat: i64,
    pub chip_run: i64,
    pub regulator: i64,
    pub baldy_chutes: i64,
    pub wildcat_face: i64,
}

/// Creates two resorts, three areas, and four runs.
///
/// ```text
/// Snowbird
///   Snowbird Center   -> Chip's Run, Regulator Johnson
///   Mineral Basin     -> Baldy Chutes
/// Alta
///   Wildcat           -> Wildcat Face
/// ```
pub fn seed_test_catalog(persistence: &mut Persistence) -> TestCatalog {
    let snowbird = persistence
        .insert_resort(&NewResort {
            resort_name: String::from("Snowbird"),
            city: Some(String::from("Snowbird")),
            state: Some(String::from("UT")),
            canyon_name: Some(String::from("Little Cottonwood")),
            ..NewResort::default()
        })
        .unwrap();
    let alta = persistence
        .insert_resort(&NewResort {
            resort_name: String::from("Alta"),
            ..NewResort::default()
        })
        .unwrap();

    let snowbird_center = persistence
        .insert_area(&area(snowbird, "Snowbird Center"))
        .unwrap();
    let mineral_basin = persistence
        .insert_area(&area(snowbird, "Mineral Basin"))
        .unwrap();
    let alta_wildcat = persistence.insert_area(&area(alta, "Wildcat")).unwrap();

    let chip_run = persistence
        .insert_run(&run(snowbird_center, "Chip's Run"))
        .unwrap();
    let regulator = persistence
        .insert_run(&run(snowbird_center, "Regulator Johnson"))
        .unwrap();
    let baldy_chutes = persistence
        .insert_run(&run(mineral_basin, "Baldy Chutes"))
        .unwrap();
    let wildcat_face = persistence
        .insert_run(&run(alta_wildcat, "Wildcat Face"))
        .unwrap();

    TestCatalog {
        snowbird,
        alta,
        snowbird_center,
        mineral_basin,
        alta_wildcat,
        chip_run,
        regulator,
        baldy_chutes,
        wildcat_face,
    }
}

fn area(resort_id: i64, zone: &str) -> NewArea {
    NewArea {
        resort_id,
        base_area: None,
        zone_name: Some(String::from(zone)),
    }
}

fn run(area_id: i64, name: &str) -> NewRun {
    NewRun {
        area_id,
        run_name: String::from(name),
        difficulty: Some(String::from("Blue")),
        is_open: true,
        ..NewRun::default()
    }
}

pub fn create_test_profile(username: &str, email: &str, fav_resort: i64) -> UserProfile {
    UserProfile {
        username: String::from(username),
        email: String::from(email),
        password: String::from("password"),
        first_name: String::from("Test"),
        last_name: String::from("User"),
        birthday: date!(1990 - 02 - 14),
        fav_resort,
    }
}

pub fn create_test_report(run_id: i64, user_id: i64, date_reported: &str) -> NewReport {
    NewReport {
        run_id,
        user_id,
        description: Some(String::from("Chalky up top")),
        conditions: ConditionFlags {
            groomed: true,
            ..ConditionFlags::default()
        },
        date_reported: String::from(date_reported),
    }
}
