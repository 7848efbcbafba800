// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication.
//!
//! A session is a row in the store keyed by an opaque random token. The
//! token is the only thing handed to the client; everything else about the
//! session (who it belongs to, when it expires) stays server-side.

use slopesense_domain::{User, format_timestamp, parse_timestamp};
use slopesense_persistence::{Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Reason given for every credential mismatch.
///
/// Unknown usernames and wrong passwords are indistinguishable to callers.
pub const INVALID_LOGIN: &str = "Invalid login";

/// A freshly created login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub session_token: String,
    pub expires_at: String,
    pub user: User,
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime (30 days).
    pub const DEFAULT_SESSION_TTL: Duration = Duration::days(30);

    /// Checks credentials and opens a session.
    ///
    /// The password is compared exactly against the stored value.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The submitted username
    /// * `password` - The submitted password
    /// * `ttl` - How long the new session stays valid
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the username is unknown
    /// or the password does not match, or `AuthError::StoreUnavailable` if
    /// the store fails.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        ttl: Duration,
    ) -> Result<NewSession, AuthError> {
        let user: User = persistence
            .get_user_by_username(username)
            .map_err(Self::map_persistence_error)?
            .filter(|user| user.password == password)
            .ok_or_else(|| {
                warn!(username, "Rejected login");
                AuthError::AuthenticationFailed {
                    reason: String::from(INVALID_LOGIN),
                }
            })?;

        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(OffsetDateTime::now_utc() + ttl).map_err(|e| {
            AuthError::StoreUnavailable {
                message: format!("Failed to format expiration time: {e}"),
            }
        })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(user_id = user.user_id, username = %user.username, "User logged in");

        Ok(NewSession {
            session_token,
            expires_at,
            user,
        })
    }

    /// Validates a session token and returns the session with its user.
    ///
    /// On success the session's last activity time is refreshed. An expired
    /// session is rejected and every expired row is purged.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is unknown or
    /// expired or its user no longer exists, or `AuthError::StoreUnavailable`
    /// if the store fails.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(SessionData, User), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::StoreUnavailable {
                message: format!("Failed to parse session expiration: {e}"),
            })?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        if now >= expires_at {
            debug!(session_id = session.session_id, "Session expired");
            let now_text: String =
                format_timestamp(now).map_err(|e| AuthError::StoreUnavailable {
                    message: e.to_string(),
                })?;
            persistence
                .delete_expired_sessions(&now_text)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: User = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((session, user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)?;

        info!("Session ended");
        Ok(())
    }

    /// Generates a 256-bit random session token, hex encoded.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}
