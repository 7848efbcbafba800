// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod handlers;
mod session;
mod views;

#[cfg(test)]
mod tests;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use clap::Parser;
use slopesense_api::{AuthenticationService, seed_catalog};
use slopesense_persistence::Persistence;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::session::CookieSigner;

/// `SlopeSense` - ski resort condition reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SLOPESENSE_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "SLOPESENSE_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3414)]
    port: u16,

    /// Directory of CSV files loaded at startup when the resort catalog is empty
    #[arg(long, env = "SLOPESENSE_SEED_DIR")]
    seed_dir: Option<PathBuf>,

    /// Key used to sign session cookies. A random key is used if absent.
    #[arg(long, env = "SLOPESENSE_SESSION_SECRET", hide_env_values = true)]
    session_secret: Option<String>,

    /// Session lifetime in days. Zero falls back to the default.
    #[arg(long, env = "SLOPESENSE_SESSION_DAYS", default_value_t = 30)]
    session_days: u16,

    /// Mark session cookies `Secure`
    #[arg(long, env = "SLOPESENSE_SECURE_COOKIES")]
    secure_cookies: bool,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex; each request holds it only
/// for the duration of its own store calls.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    pub signer: Arc<CookieSigner>,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
}

impl AppState {
    fn new(
        persistence: Persistence,
        signer: CookieSigner,
        session_ttl: Duration,
        secure_cookies: bool,
    ) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            signer: Arc::new(signer),
            session_ttl,
            secure_cookies,
        }
    }
}

/// Builds the router.
///
/// The login gate is a route layer, so it only sees matched routes and
/// unknown paths still reach the fallback.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route("/logout", get(handlers::logout_handler))
        .route(
            "/profile",
            get(handlers::profile_page).post(handlers::profile_submit),
        )
        .route("/slopes", get(handlers::slopes_start))
        .route("/displaySlopes", post(handlers::display_slopes))
        .route(
            "/reports",
            get(handlers::reports_query).post(handlers::reports_form),
        )
        .route("/reports/{user_id}", post(handlers::submit_report))
        .route(
            "/deleteReport/{report_id}/delete",
            post(handlers::remove_report),
        )
        .route("/api/resorts/{resort_id}/areas", get(handlers::resort_areas))
        .route("/api/areas/{area_id}/runs", get(handlers::area_runs))
        .route_layer(middleware::from_fn(session::require_login))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::load_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SlopeSense server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    if let Some(dir) = &args.seed_dir {
        if let Some(counts) = seed_catalog(&mut persistence, dir)? {
            info!(
                resorts = counts.resorts,
                areas = counts.areas,
                runs = counts.runs,
                "Catalog loaded"
            );
        }
    }

    let signer: CookieSigner = if let Some(secret) = &args.session_secret {
        CookieSigner::new(secret.as_bytes())
    } else {
        warn!("No session secret configured; sessions will not survive a restart");
        CookieSigner::random()
    };

    let session_ttl: Duration = if args.session_days == 0 {
        AuthenticationService::DEFAULT_SESSION_TTL
    } else {
        Duration::days(i64::from(args.session_days))
    };

    let app_state: AppState =
        AppState::new(persistence, signer, session_ttl, args.secure_cookies);
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
