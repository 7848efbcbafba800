// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router fixtures and request builders.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use slopesense_domain::{NewArea, NewResort, NewRun};
use slopesense_persistence::Persistence;
use time::Duration;
use tower::ServiceExt;

use crate::session::CookieSigner;
use crate::{AppState, build_router};

pub const TEST_SECRET: &[u8] = b"test-session-secret";
pub const PASSWORD: &str = "powderday";

/// Ids of the fixture catalog.
pub struct Catalog {
    pub snowbird: i64,
    pub alta: i64,
    pub snowbird_center: i64,
    pub mineral_basin: i64,
    pub regulator: i64,
    pub baldy_chutes: i64,
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub catalog: Catalog,
}

/// Router over an in-memory store holding the fixture catalog.
pub fn create_test_app() -> TestApp {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let catalog = create_test_catalog(&mut persistence);
    let state = AppState::new(
        persistence,
        CookieSigner::new(TEST_SECRET),
        Duration::days(30),
        false,
    );
    let router = build_router(state.clone());
    TestApp {
        state,
        router,
        catalog,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form_body(fields))).unwrap())
            .await
    }

    /// Registers `username` with a favorite of Snowbird.
    pub async fn register(&self, username: &str, email: &str) -> Response<Body> {
        let fav_resort = self.catalog.snowbird.to_string();
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", email),
                ("password", PASSWORD),
                ("first_name", "Alice"),
                ("last_name", "Skier"),
                ("birthday", "1990-02-14"),
                ("fav_resort", &fav_resort),
            ],
            None,
        )
        .await
    }

    /// Logs in and returns the `Cookie` header value for later requests.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post_form(
                "/login",
                &[("username", username), ("password", PASSWORD)],
                None,
            )
            .await;
        session_cookie_pair(&response)
    }

    /// Registers and logs in a user; returns their id and cookie.
    pub async fn signed_in_user(&self, username: &str) -> (i64, String) {
        self.register(username, &format!("{username}@example.com"))
            .await;
        let cookie = self.login(username).await;
        let user_id = self
            .state
            .persistence
            .lock()
            .await
            .get_user_by_username(username)
            .unwrap()
            .unwrap()
            .user_id;
        (user_id, cookie)
    }
}

/// Two resorts, three areas, three runs.
fn create_test_catalog(persistence: &mut Persistence) -> Catalog {
    let snowbird = resort(persistence, "Snowbird");
    let alta = resort(persistence, "Alta");
    let snowbird_center = area(persistence, snowbird, "Snowbird Center");
    let mineral_basin = area(persistence, snowbird, "Mineral Basin");
    let wildcat = area(persistence, alta, "Wildcat");
    run(persistence, wildcat, "Wildcat Face");

    Catalog {
        snowbird,
        alta,
        snowbird_center,
        mineral_basin,
        regulator: run(persistence, snowbird_center, "Regulator Johnson"),
        baldy_chutes: run(persistence, mineral_basin, "Baldy Chutes"),
    }
}

fn resort(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .insert_resort(&NewResort {
            resort_name: String::from(name),
            state: Some(String::from("UT")),
            ..NewResort::default()
        })
        .unwrap()
}

fn area(persistence: &mut Persistence, resort_id: i64, zone: &str) -> i64 {
    persistence
        .insert_area(&NewArea {
            resort_id,
            base_area: None,
            zone_name: Some(String::from(zone)),
        })
        .unwrap()
}

fn run(persistence: &mut Persistence, area_id: i64, name: &str) -> i64 {
    persistence
        .insert_run(&NewRun {
            area_id,
            run_name: String::from(name),
            difficulty: Some(String::from("Black")),
            is_open: true,
            ..NewRun::default()
        })
        .unwrap()
}

/// Encodes simple form fields. Spaces become `+`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}={}", value.replace(' ', "+")))
        .collect::<Vec<String>>()
        .join("&")
}

pub fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// The `name=value` part of the session `Set-Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> String {
    set_cookie(response)
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
