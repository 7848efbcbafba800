// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use slopesense_domain::{NewArea, NewResort, NewRun, Report};
use slopesense_persistence::Persistence;

use crate::{CreateReportRequest, UserProfileRequest, register_user};

/// Ids of the fixture catalog.
pub struct Catalog {
    pub snowbird: i64,
    pub alta: i64,
    pub snowbird_center: i64,
    pub mineral_basin: i64,
    pub wildcat: i64,
    pub chip_run: i64,
    pub regulator: i64,
    pub baldy_chutes: i64,
    pub wildcat_face: i64,
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Two resorts, three areas, four runs.
pub fn create_test_catalog(persistence: &mut Persistence) -> Catalog {
    let snowbird = resort(persistence, "Snowbird");
    let alta = resort(persistence, "Alta");
    let snowbird_center = area(persistence, snowbird, "Snowbird Center");
    let mineral_basin = area(persistence, snowbird, "Mineral Basin");
    let wildcat = area(persistence, alta, "Wildcat");

    Catalog {
        snowbird,
        alta,
        snowbird_center,
        mineral_basin,
        wildcat,
        chip_run: run(persistence, snowbird_center, "Chip's Run"),
        regulator: run(persistence, snowbird_center, "Regulator Johnson"),
        baldy_chutes: run(persistence, mineral_basin, "Baldy Chutes"),
        wildcat_face: run(persistence, wildcat, "Wildcat Face"),
    }
}

fn resort(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .insert_resort(&NewResort {
            resort_name: String::from(name),
            state: Some(String::from("UT")),
            ..NewResort::default()
        })
        .unwrap()
}

fn area(persistence: &mut Persistence, resort_id: i64, zone: &str) -> i64 {
    persistence
        .insert_area(&NewArea {
            resort_id,
            base_area: None,
            zone_name: Some(String::from(zone)),
        })
        .unwrap()
}

fn run(persistence: &mut Persistence, area_id: i64, name: &str) -> i64 {
    persistence
        .insert_run(&NewRun {
            area_id,
            run_name: String::from(name),
            difficulty: Some(String::from("Black")),
            is_open: true,
            ..NewRun::default()
        })
        .unwrap()
}

pub fn create_profile_request(username: &str, email: &str, fav_resort: i64) -> UserProfileRequest {
    UserProfileRequest {
        username: Some(String::from(username)),
        email: Some(String::from(email)),
        password: Some(String::from("powderday")),
        first_name: Some(String::from("Alice")),
        last_name: Some(String::from("Skier")),
        birthday: Some(String::from("1990-02-14")),
        fav_resort: Some(fav_resort.to_string()),
    }
}

/// Registers a user and returns their id.
pub fn create_test_user(persistence: &mut Persistence, username: &str, fav_resort: i64) -> i64 {
    let email = format!("{username}@example.com");
    register_user(
        persistence,
        &create_profile_request(username, &email, fav_resort),
    )
    .unwrap()
    .user_id
}

pub fn create_report_request(run_id: i64) -> CreateReportRequest {
    CreateReportRequest {
        run_id: Some(run_id.to_string()),
        description: Some(String::from("  Wind buff on the ridge  ")),
        powder: Some(String::from("on")),
        groomed: Some(String::from("true")),
        ..CreateReportRequest::default()
    }
}

/// Reads back a report that must exist.
pub fn stored_report(persistence: &mut Persistence, report_id: i64) -> Report {
    persistence.get_report(report_id).unwrap().unwrap()
}
