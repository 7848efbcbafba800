// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session cookies, the request context, and the login gate.
//!
//! # Request flow
//!
//! 1. [`load_session`] runs on every request. It reads the session cookie,
//!    verifies its signature, validates the token against the session
//!    store, and inserts a [`RequestContext`] into the request extensions.
//!    Any failure leaves the request anonymous.
//! 2. [`require_login`] runs on matched routes only. Paths outside the
//!    public allow-list are answered with the login page unless the
//!    context carries a user.
//!
//! # Cookie format
//!
//! The cookie value is `token.signature`, where the signature is the
//! unpadded base64url HMAC-SHA256 of the token under the server secret.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use slopesense_api::{AuthError, AuthenticationService};
use slopesense_domain::User;
use time::Duration;
use tracing::{debug, error, warn};

use crate::AppState;
use crate::views;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "slopesense_session";

/// Message shown when the gate turns a request away.
pub const LOGIN_REQUIRED: &str = "Please log in to continue.";

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/logout"];

/// Cookie and signature problems.
///
/// None of these reach the client; a request with a bad cookie is simply
/// anonymous.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cookie header is not valid text")]
    InvalidHeader,

    #[error("session cookie is malformed")]
    MalformedCookie,

    #[error("session cookie signature does not verify")]
    BadSignature,

    #[error("session secret cannot key the signature")]
    InvalidSecret,
}

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct CookieSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CookieSigner {
    /// Creates a signer keyed by `secret`.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: secret.to_vec(),
        }
    }

    /// Creates a signer with a random per-process key.
    #[must_use]
    pub fn random() -> Self {
        Self::new(&rand::random::<[u8; 32]>())
    }

    /// Returns the cookie value for `token`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSecret` if the key is unusable.
    pub fn sign(&self, token: &str) -> Result<String, SessionError> {
        let mut mac: HmacSha256 = self.mac()?;
        mac.update(token.as_bytes());
        let signature: String = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{token}.{signature}"))
    }

    /// Verifies a cookie value and returns the token it carries.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `token.signature` or the
    /// signature does not match.
    pub fn verify(&self, value: &str) -> Result<String, SessionError> {
        let (token, signature) = value
            .rsplit_once('.')
            .filter(|(token, _)| !token.is_empty())
            .ok_or(SessionError::MalformedCookie)?;
        let signature: Vec<u8> = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionError::MalformedCookie)?;

        let mut mac: HmacSha256 = self.mac()?;
        mac.update(token.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        Ok(token.to_string())
    }

    fn mac(&self) -> Result<HmacSha256, SessionError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| SessionError::InvalidSecret)
    }
}

/// Who is making the request.
///
/// Built once per request before dispatch and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session_token: Option<String>,
    pub current_user: Option<User>,
}

impl RequestContext {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Builds the [`RequestContext`] for every request.
pub async fn load_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let context: RequestContext = resolve_context(&state, request.headers()).await;
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Turns away anonymous requests to protected paths.
pub async fn require_login(request: Request, next: Next) -> Response {
    let is_public: bool = PUBLIC_PATHS.contains(&request.uri().path());
    let is_authenticated: bool = request
        .extensions()
        .get::<RequestContext>()
        .is_some_and(RequestContext::is_authenticated);

    if is_public || is_authenticated {
        return next.run(request).await;
    }

    debug!(path = %request.uri().path(), "Login required");
    views::login_page(&RequestContext::default(), LOGIN_REQUIRED, "", StatusCode::UNAUTHORIZED)
}

async fn resolve_context(state: &AppState, headers: &HeaderMap) -> RequestContext {
    let token: String = match session_token(&state.signer, headers) {
        Ok(Some(token)) => token,
        Ok(None) => return RequestContext::default(),
        Err(e) => {
            warn!(error = %e, "Ignoring session cookie");
            return RequestContext::default();
        }
    };

    let mut persistence = state.persistence.lock().await;
    let validated = AuthenticationService::validate_session(&mut persistence, &token);
    drop(persistence);

    match validated {
        Ok((_, user)) => RequestContext {
            session_token: Some(token),
            current_user: Some(user),
        },
        Err(AuthError::AuthenticationFailed { reason }) => {
            warn!(reason, "Rejected session");
            RequestContext::default()
        }
        Err(e @ AuthError::StoreUnavailable { .. }) => {
            error!(error = %e, "Session lookup failed");
            RequestContext::default()
        }
    }
}

/// Extracts and verifies the session token from the `Cookie` headers.
///
/// # Errors
///
/// Returns an error if a session cookie is present but unreadable or
/// incorrectly signed.
pub fn session_token(
    signer: &CookieSigner,
    headers: &HeaderMap,
) -> Result<Option<String>, SessionError> {
    for header in headers.get_all(COOKIE) {
        let cookies: &str = header.to_str().map_err(|_| SessionError::InvalidHeader)?;
        for cookie in cookies.split(';') {
            if let Some((name, value)) = cookie.trim().split_once('=')
                && name == SESSION_COOKIE
            {
                return signer.verify(value).map(Some);
            }
        }
    }
    Ok(None)
}

/// `Set-Cookie` value that stores a signed session.
#[must_use]
pub fn session_cookie(value: &str, max_age: Duration, secure: bool) -> String {
    cookie_header(value, max_age.whole_seconds(), secure)
}

/// `Set-Cookie` value that clears the session.
#[must_use]
pub fn expired_session_cookie(secure: bool) -> String {
    cookie_header("", 0, secure)
}

fn cookie_header(value: &str, max_age: i64, secure: bool) -> String {
    let secure: &str = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}")
}
