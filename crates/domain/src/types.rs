// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// A ski resort: the root of the terrain hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resort {
    pub resort_id: i64,
    pub resort_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
    pub total_acres: Option<i32>,
    pub canyon_name: Option<String>,
    pub ski_patrol_phone: Option<String>,
    pub has_night_skiing: bool,
    pub date_created: String,
}

/// A named zone of a resort (e.g. a base area and its lifts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: i64,
    pub resort_id: i64,
    pub base_area: Option<String>,
    pub zone_name: Option<String>,
    pub date_created: String,
}

impl Area {
    /// Human-readable label for dropdowns and listings.
    ///
    /// Falls back to the base area, then to the numeric id, when the
    /// zone name is missing.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.zone_name, &self.base_area) {
            (Some(zone), Some(base)) if !base.is_empty() => format!("{zone} ({base})"),
            (Some(zone), _) => zone.clone(),
            (None, Some(base)) => base.clone(),
            (None, None) => format!("Area {}", self.area_id),
        }
    }
}

/// A single skiable run within an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub run_id: i64,
    pub area_id: i64,
    pub run_name: String,
    pub difficulty: Option<String>,
    pub is_open: bool,
    pub is_terrain_park: bool,
    pub backcountry_access: bool,
    pub bootpack_req: bool,
    pub date_created: String,
}

/// A registered user.
///
/// The password is stored exactly as submitted. Hashing is deliberately
/// not performed; see the project design notes.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<Date>,
    pub fav_resort: Option<i64>,
    pub date_created: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("birthday", &self.birthday)
            .field("fav_resort", &self.fav_resort)
            .field("date_created", &self.date_created)
            .finish()
    }
}

/// Validated profile fields used for both registration and profile updates.
#[derive(Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Date,
    pub fav_resort: i64,
}

impl std::fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("birthday", &self.birthday)
            .field("fav_resort", &self.fav_resort)
            .finish()
    }
}

/// The fixed set of snow/hazard observations a report can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConditionFlags {
    pub obstacle: bool,
    pub groomed: bool,
    pub icy: bool,
    pub powder: bool,
    pub moguls: bool,
    pub granular: bool,
    pub thin_cover: bool,
    pub packed: bool,
    pub wet: bool,
}

impl ConditionFlags {
    /// Display labels of every flag that is set, in a stable order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.obstacle, "Obstacle"),
            (self.groomed, "Groomed"),
            (self.icy, "Icy"),
            (self.powder, "Powder"),
            (self.moguls, "Moguls"),
            (self.granular, "Granular"),
            (self.thin_cover, "Thin cover"),
            (self.packed, "Packed"),
            (self.wet, "Wet"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }

    /// Returns `true` when no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels().is_empty()
    }
}

/// A user-submitted condition report for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: i64,
    pub run_id: i64,
    pub user_id: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub conditions: ConditionFlags,
    pub date_reported: String,
}

/// A report that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub run_id: i64,
    pub user_id: i64,
    pub description: Option<String>,
    pub conditions: ConditionFlags,
    pub date_reported: String,
}
