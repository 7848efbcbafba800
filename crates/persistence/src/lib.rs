// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for SlopeSense.
//!
//! This crate stores the terrain catalog (resorts, areas, runs), user
//! accounts, condition reports, and login sessions in `SQLite` via Diesel.
//!
//! ## Schema
//!
//! The schema is created by embedded migrations (`migrations/`) when a
//! connection is opened. Foreign keys are enforced on every connection and
//! verified at startup:
//!
//! - deleting a resort removes its areas, runs, and their reports
//! - deleting a user removes their reports and sessions
//! - deleting a resort clears it as any user's favorite
//!
//! Username and email are both UNIQUE at the storage level. A violation is
//! reported as [`PersistenceError::UniqueViolation`] so callers can turn a
//! lost check-then-insert race into the same message as the pre-check.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller an isolated,
//! migrated database with no external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use slopesense_domain::{
    Area, CatalogSeed, FilterSelection, NewArea, NewReport, NewResort, NewRun, Report,
    ReportSummary, Resort, Run, RunSummary, User, UserProfile,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{CatalogCounts, SessionData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter owning a single `SQLite` connection.
///
/// Every method borrows `self` mutably; callers that share the adapter
/// across tasks wrap it in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so tests never
    /// observe each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Re-checks that foreign key enforcement is active on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off or the check fails.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Lists every resort, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_resorts(&mut self) -> Result<Vec<Resort>, PersistenceError> {
        queries::list_resorts(&mut self.conn)
    }

    /// Retrieves a resort by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_resort(&mut self, resort_id: i64) -> Result<Option<Resort>, PersistenceError> {
        queries::get_resort(&mut self.conn, resort_id)
    }

    /// Lists the areas of a resort, ordered by zone name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_areas_for_resort(&mut self, resort_id: i64) -> Result<Vec<Area>, PersistenceError> {
        queries::list_areas_for_resort(&mut self.conn, resort_id)
    }

    /// Lists the runs of an area, ordered by run name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_runs_for_area(&mut self, area_id: i64) -> Result<Vec<Run>, PersistenceError> {
        queries::list_runs_for_area(&mut self.conn, area_id)
    }

    /// Retrieves a run by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_run(&mut self, run_id: i64) -> Result<Option<Run>, PersistenceError> {
        queries::get_run(&mut self.conn, run_id)
    }

    /// Resolves `(resort_id, area_id)` for a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_run_lineage(&mut self, run_id: i64) -> Result<Option<(i64, i64)>, PersistenceError> {
        queries::get_run_lineage(&mut self.conn, run_id)
    }

    /// Resolves the resort that owns an area.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_area_resort(&mut self, area_id: i64) -> Result<Option<i64>, PersistenceError> {
        queries::get_area_resort(&mut self.conn, area_id)
    }

    /// Inserts a resort and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_resort(&mut self, resort: &NewResort) -> Result<i64, PersistenceError> {
        mutations::insert_resort(&mut self.conn, resort)
    }

    /// Inserts an area and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resort does not exist or the insert fails.
    pub fn insert_area(&mut self, area: &NewArea) -> Result<i64, PersistenceError> {
        mutations::insert_area(&mut self.conn, area)
    }

    /// Inserts a run and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the area does not exist or the insert fails.
    pub fn insert_run(&mut self, run: &NewRun) -> Result<i64, PersistenceError> {
        mutations::insert_run(&mut self.conn, run)
    }

    /// Deletes a resort and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_resort(&mut self, resort_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_resort(&mut self.conn, resort_id)
    }

    /// Replaces the whole terrain catalog atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed is inconsistent or a write fails.
    pub fn replace_catalog(&mut self, seed: &CatalogSeed) -> Result<CatalogCounts, PersistenceError> {
        mutations::replace_catalog(&mut self.conn, seed)
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// Lists runs matching every present selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_run_summaries(
        &mut self,
        selection: &FilterSelection,
    ) -> Result<Vec<RunSummary>, PersistenceError> {
        queries::list_run_summaries(&mut self.conn, selection)
    }

    /// Lists reports matching every present selector, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_report_summaries(
        &mut self,
        selection: &FilterSelection,
    ) -> Result<Vec<ReportSummary>, PersistenceError> {
        queries::list_report_summaries(&mut self.conn, selection)
    }

    /// Lists the newest `limit` reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_recent_reports(&mut self, limit: i64) -> Result<Vec<ReportSummary>, PersistenceError> {
        queries::list_recent_reports(&mut self.conn, limit)
    }

    /// Lists every report filed by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_reports_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<ReportSummary>, PersistenceError> {
        queries::list_reports_for_user(&mut self.conn, user_id)
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates a user and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the username or email
    /// is taken, or another error if the insert fails.
    pub fn create_user(&mut self, profile: &UserProfile) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, profile)
    }

    /// Overwrites a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the user does not exist,
    /// `PersistenceError::UniqueViolation` on a username/email clash, or
    /// another error if the update fails.
    pub fn update_user(&mut self, user_id: i64, profile: &UserProfile) -> Result<(), PersistenceError> {
        mutations::update_user(&mut self.conn, user_id, profile)
    }

    /// Deletes a user and their reports and sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_user(&mut self, user_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_user(&mut self.conn, user_id)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, PersistenceError> {
        queries::get_user_by_username(&mut self.conn, username)
    }

    /// Checks whether a username is held by a user other than `excluding`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_username_taken(
        &mut self,
        username: &str,
        excluding: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::is_username_taken(&mut self.conn, username, excluding)
    }

    /// Checks whether an email is held by a user other than `excluding`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_email_taken(
        &mut self,
        email: &str,
        excluding: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::is_email_taken(&mut self.conn, email, excluding)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::count_users(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Creates a report and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyViolation` if the run or user
    /// does not exist, or another error if the insert fails.
    pub fn create_report(&mut self, report: &NewReport) -> Result<i64, PersistenceError> {
        mutations::create_report(&mut self.conn, report)
    }

    /// Retrieves a report by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_report(&mut self, report_id: i64) -> Result<Option<Report>, PersistenceError> {
        queries::get_report(&mut self.conn, report_id)
    }

    /// Deletes a report. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_report(&mut self, report_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_report(&mut self.conn, report_id)
    }

    /// Counts all reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_reports(&mut self) -> Result<i64, PersistenceError> {
        queries::count_reports(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Creates a session and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::get_session_by_token(&mut self.conn, session_token)
    }

    /// Touches a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::delete_expired_sessions(&mut self.conn, now)
    }
}
