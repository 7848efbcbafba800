// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.

pub mod catalog;
pub mod listings;
pub mod reports;
pub mod sessions;
pub mod users;

pub use catalog::{
    get_area_resort, get_resort, get_run, get_run_lineage, list_areas_for_resort, list_resorts,
    list_runs_for_area,
};
pub use listings::{
    list_recent_reports, list_report_summaries, list_reports_for_user, list_run_summaries,
};
pub use reports::{count_reports, get_report};
pub use sessions::get_session_by_token;
pub use users::{count_users, get_user_by_id, get_user_by_username, is_email_taken, is_username_taken};
