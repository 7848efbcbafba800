// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account mutations.
//!
//! Passwords are written exactly as supplied. Uniqueness of username and
//! email is enforced by the schema; violations surface as
//! `PersistenceError::UniqueViolation`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slopesense_domain::{UserProfile, format_date};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Creates a new user from a validated profile.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the username or email is
/// already stored, `PersistenceError::ForeignKeyViolation` if the favorite
/// resort does not exist, or another error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    profile: &UserProfile,
) -> Result<i64, PersistenceError> {
    let birthday: String = format_date(profile.birthday)?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(&profile.username),
            users::email.eq(&profile.email),
            users::password.eq(&profile.password),
            users::first_name.eq(&profile.first_name),
            users::last_name.eq(&profile.last_name),
            users::birthday.eq(&birthday),
            users::fav_resort.eq(profile.fav_resort),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, username = %profile.username, "Created user");
    Ok(user_id)
}

/// Overwrites every profile field of an existing user.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist,
/// `PersistenceError::UniqueViolation` if the new username or email
/// belongs to someone else, or another error if the update fails.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    profile: &UserProfile,
) -> Result<(), PersistenceError> {
    let birthday: String = format_date(profile.birthday)?;

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::username.eq(&profile.username),
            users::email.eq(&profile.email),
            users::password.eq(&profile.password),
            users::first_name.eq(&profile.first_name),
            users::last_name.eq(&profile.last_name),
            users::birthday.eq(&birthday),
            users::fav_resort.eq(profile.fav_resort),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    info!(user_id, "Updated user profile");
    Ok(())
}

/// Deletes a user. Their reports and sessions cascade.
///
/// Returns `false` if no such user existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(user_id, "Deleted user");
    }
    Ok(rows_affected > 0)
}
