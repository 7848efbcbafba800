// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator-provisioned catalog records.
//!
//! Resorts, areas and runs are bulk-loaded at provisioning time and never
//! created through request handlers. The seed types reference their parent
//! by 1-based position in the parent list, because the generated database
//! ids are not known until the parents are inserted.

/// A resort that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewResort {
    pub resort_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
    pub total_acres: Option<i32>,
    pub canyon_name: Option<String>,
    pub ski_patrol_phone: Option<String>,
    pub has_night_skiing: bool,
}

/// An area that has not been persisted yet, attached to a known resort id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArea {
    pub resort_id: i64,
    pub base_area: Option<String>,
    pub zone_name: Option<String>,
}

/// A run that has not been persisted yet, attached to a known area id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct NewRun {
    pub area_id: i64,
    pub run_name: String,
    pub difficulty: Option<String>,
    pub is_open: bool,
    pub is_terrain_park: bool,
    pub backcountry_access: bool,
    pub bootpack_req: bool,
}

/// An area row from a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedArea {
    /// 1-based position of the owning resort in [`CatalogSeed::resorts`].
    pub resort_index: usize,
    pub base_area: Option<String>,
    pub zone_name: Option<String>,
}

/// A run row from a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SeedRun {
    /// 1-based position of the owning area in [`CatalogSeed::areas`].
    pub area_index: usize,
    pub run_name: String,
    pub difficulty: Option<String>,
    pub is_open: bool,
    pub is_terrain_park: bool,
    pub backcountry_access: bool,
    pub bootpack_req: bool,
}

/// A complete terrain catalog ready to replace whatever is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSeed {
    pub resorts: Vec<NewResort>,
    pub areas: Vec<SeedArea>,
    pub runs: Vec<SeedRun>,
}

impl CatalogSeed {
    /// Returns the first area whose resort index does not resolve, if any.
    ///
    /// The result is the 1-based position of the offending area.
    #[must_use]
    pub fn first_orphan_area(&self) -> Option<usize> {
        self.areas
            .iter()
            .position(|area| area.resort_index == 0 || area.resort_index > self.resorts.len())
            .map(|idx| idx + 1)
    }

    /// Returns the first run whose area index does not resolve, if any.
    ///
    /// The result is the 1-based position of the offending run.
    #[must_use]
    pub fn first_orphan_run(&self) -> Option<usize> {
        self.runs
            .iter()
            .position(|run| run.area_index == 0 || run.area_index > self.areas.len())
            .map(|idx| idx + 1)
    }
}
