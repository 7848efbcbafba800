// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;

use super::helpers::{
    PASSWORD, body_text, create_test_app, location, session_cookie_pair, set_cookie,
};
use crate::session::SESSION_COOKIE;

#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = create_test_app();

    let response = app.register("alice", "alice@example.com").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let count = app.state.persistence.lock().await.count_users().unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_with_taken_email_keeps_one_account() {
    let app = create_test_app();
    app.register("alice", "alice@example.com").await;

    let response = app.register("bob", "alice@example.com").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("That email is already taken"));
    // The form keeps what was typed.
    assert!(body.contains("value=\"bob\""));
    let count = app.state.persistence.lock().await.count_users().unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_with_taken_username_is_rejected() {
    let app = create_test_app();
    app.register("alice", "alice@example.com").await;

    let response = app.register("alice", "other@example.com").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("That username is already taken")
    );
}

#[tokio::test]
async fn test_register_with_missing_field_is_bad_request() {
    let app = create_test_app();

    let response = app
        .post_form(
            "/register",
            &[("username", "alice"), ("email", "alice@example.com")],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let count = app.state.persistence.lock().await.count_users().unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_login_sets_signed_session_cookie() {
    let app = create_test_app();
    app.register("alice", "alice@example.com").await;

    let response = app
        .post_form(
            "/login",
            &[("username", "alice"), ("password", PASSWORD)],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_home_shows_dashboard_after_login() {
    let app = create_test_app();
    let (_, cookie) = app.signed_in_user("alice").await;

    let response = app.get("/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome back, alice"));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let app = create_test_app();
    app.register("alice", "alice@example.com").await;

    let response = app
        .post_form(
            "/login",
            &[("username", "alice"), ("password", "wrong")],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());
    assert!(body_text(response).await.contains("Invalid login"));
}

#[tokio::test]
async fn test_login_for_unknown_user_matches_wrong_password() {
    let app = create_test_app();

    let response = app
        .post_form(
            "/login",
            &[("username", "nobody"), ("password", PASSWORD)],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Invalid login"));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_revokes_session() {
    let app = create_test_app();
    let (_, cookie) = app.signed_in_user("alice").await;

    let response = app.get("/logout", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(set_cookie(&response).contains("Max-Age=0"));

    let replayed = app.get("/profile", Some(&cookie)).await;
    assert_eq!(replayed.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_deletes_the_session_row() {
    let app = create_test_app();
    let (_, cookie) = app.signed_in_user("alice").await;
    let (_, signed) = cookie.split_once('=').unwrap();
    let (token, _) = signed.rsplit_once('.').unwrap();
    let before = app
        .state
        .persistence
        .lock()
        .await
        .get_session_by_token(token)
        .unwrap();
    assert!(before.is_some());

    app.get("/logout", Some(&cookie)).await;

    let after = app
        .state
        .persistence
        .lock()
        .await
        .get_session_by_token(token)
        .unwrap();
    assert!(after.is_none());
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let app = create_test_app();

    let response = app.get("/logout", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie_pair(&response).ends_with('='));
}

#[tokio::test]
async fn test_profile_page_shows_favorite_resort() {
    let app = create_test_app();
    let (_, cookie) = app.signed_in_user("alice").await;

    let response = app.get("/profile", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("alice@example.com"));
    assert!(body.contains(&format!(
        "<option value=\"{}\" selected>Snowbird</option>",
        app.catalog.snowbird
    )));
}

#[tokio::test]
async fn test_profile_update_changes_stored_user() {
    let app = create_test_app();
    let (user_id, cookie) = app.signed_in_user("alice").await;
    let alta = app.catalog.alta.to_string();

    let response = app
        .post_form(
            "/profile",
            &[
                ("username", "alice"),
                ("email", "alice@example.com"),
                ("password", PASSWORD),
                ("first_name", "Alicia"),
                ("last_name", "Skier"),
                ("birthday", "1990-02-14"),
                ("fav_resort", &alta),
            ],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");
    let user = app
        .state
        .persistence
        .lock()
        .await
        .get_user_by_id(user_id)
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Alicia"));
    assert_eq!(user.fav_resort, Some(app.catalog.alta));
}

#[tokio::test]
async fn test_profile_update_to_taken_username_is_rejected() {
    let app = create_test_app();
    app.register("bob", "bob@example.com").await;
    let (user_id, cookie) = app.signed_in_user("alice").await;
    let snowbird = app.catalog.snowbird.to_string();

    let response = app
        .post_form(
            "/profile",
            &[
                ("username", "bob"),
                ("email", "alice@example.com"),
                ("password", PASSWORD),
                ("first_name", "Alice"),
                ("last_name", "Skier"),
                ("birthday", "1990-02-14"),
                ("fav_resort", &snowbird),
            ],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("That username is already taken")
    );
    let user = app
        .state
        .persistence
        .lock()
        .await
        .get_user_by_id(user_id)
        .unwrap()
        .unwrap();
    assert_eq!(user.username, "alice");
}
