// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.

pub mod catalog;
pub mod reports;
pub mod sessions;
pub mod users;

pub use catalog::{delete_resort, insert_area, insert_resort, insert_run, replace_catalog};
pub use reports::{create_report, delete_report};
pub use sessions::{
    create_session, delete_expired_sessions, delete_session, update_session_activity,
};
pub use users::{create_user, delete_user, update_user};
