// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use slopesense_domain::{User, parse_date};
use tracing::debug;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    birthday: Option<String>,
    fav_resort: Option<i64>,
    date_created: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let birthday = row
            .birthday
            .as_deref()
            .map(|text| parse_date("birthday", text))
            .transpose()?;

        Ok(Self {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            birthday,
            fav_resort: row.fav_resort,
            date_created: row.date_created,
        })
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored birthday
/// is malformed.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(User::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by exact username.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored birthday
/// is malformed.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, PersistenceError> {
    debug!(username, "Looking up user by username");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(User::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether a username belongs to any user other than `excluding`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_username_taken(
    conn: &mut SqliteConnection,
    username: &str,
    excluding: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = users::table
        .filter(users::username.eq(username))
        .into_boxed();
    if let Some(user_id) = excluding {
        query = query.filter(users::user_id.ne(user_id));
    }

    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Checks whether an email belongs to any user other than `excluding`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    excluding: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = users::table.filter(users::email.eq(email)).into_boxed();
    if let Some(user_id) = excluding {
        query = query.filter(users::user_id.ne(user_id));
    }

    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}
