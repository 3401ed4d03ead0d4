//! Integration tests for the login, refresh, and logout endpoints.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn login_sets_cookies_and_omits_refresh_token_from_body() {
    let app = helpers::TestApp::new().await;
    app.mount_token_success("AT1", "RT1").await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "admin", "password": "secret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["token"]["access_token"], "AT1");
    assert_eq!(response.body["token"]["token_type"], "Bearer");
    assert_eq!(response.body["token"]["expires_in"], 3600);
    assert!(response.body["token"].get("refresh_token").is_none());

    assert_eq!(response.cookie_value("access_token").as_deref(), Some("AT1"));
    assert_eq!(response.cookie_value("refresh_token").as_deref(), Some("RT1"));

    let access_line = response.cookie_line("access_token").unwrap();
    assert!(access_line.contains("HttpOnly"));
    assert!(access_line.contains("SameSite=Lax"));
    assert!(access_line.contains("Max-Age=3600"));

    let refresh_line = response.cookie_line("refresh_token").unwrap();
    assert!(refresh_line.contains("Path=/api"));
}

#[tokio::test]
async fn login_with_missing_password_is_rejected_before_any_upstream_call() {
    let app = helpers::TestApp::new().await;
    app.mount_token_success("AT1", "RT1").await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "admin" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.upstream_hits("/oauth/token").await, 0);
}

#[tokio::test]
async fn login_with_invalid_credentials_maps_to_401() {
    let app = helpers::TestApp::new().await;
    app.mount_token_failure(
        401,
        serde_json::json!({ "error": "invalid_client", "error_description": "nope" }),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "admin", "password": "wrong" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_CREDENTIALS");
    assert!(response.cookie_value("access_token").is_none());
}

#[tokio::test]
async fn login_with_partial_token_response_never_stores_cookies() {
    let app = helpers::TestApp::new().await;
    app.mount_token_failure(
        200,
        serde_json::json!({ "access_token": "AT1", "token_type": "Bearer", "expires_in": 3600 }),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "admin", "password": "secret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "MALFORMED_TOKEN_RESPONSE");
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn login_passes_other_provider_statuses_through() {
    let app = helpers::TestApp::new().await;
    app.mount_token_failure(
        503,
        serde_json::json!({
            "error": "temporarily_unavailable",
            "error_description": "Maintenance",
        }),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "admin", "password": "secret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["message"], "Maintenance");
}

#[tokio::test]
async fn refresh_rotates_the_stored_pair() {
    let app = helpers::TestApp::new().await;
    app.mount_token_success("AT2", "RT2").await;

    let response = app
        .request("POST", "/api/refresh", None, Some("refresh_token=RT1"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["expires_in"], 3600);
    assert_eq!(response.cookie_value("access_token").as_deref(), Some("AT2"));
    assert_eq!(response.cookie_value("refresh_token").as_deref(), Some("RT2"));

    // The grant must have carried the stored refresh token.
    let requests = app.upstream.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(body.contains("grant_type=refresh_token"));
    assert!(body.contains("refresh_token=RT1"));
}

#[tokio::test]
async fn rejected_refresh_clears_cookies_and_requires_login() {
    let app = helpers::TestApp::new().await;
    app.mount_token_failure(
        401,
        serde_json::json!({ "error": "invalid_grant", "error_description": "Token revoked" }),
    )
    .await;

    let response = app
        .request("POST", "/api/refresh", None, Some("refresh_token=STALE"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["requiresLogin"], true);

    // Both token cookies are cleared.
    assert_eq!(response.cookie_value("access_token").as_deref(), Some(""));
    assert_eq!(response.cookie_value("refresh_token").as_deref(), Some(""));
}

#[tokio::test]
async fn refresh_without_a_stored_token_requires_login() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/api/refresh", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["requiresLogin"], true);
    assert_eq!(app.upstream_hits("/oauth/token").await, 0);
}

#[tokio::test]
async fn logout_clears_every_auth_cookie() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/logout",
            None,
            Some("access_token=AT1; refresh_token=RT1"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    for name in ["access_token", "refresh_token", "token_type", "expires_in"] {
        assert_eq!(
            response.cookie_value(name).as_deref(),
            Some(""),
            "cookie {name} should be cleared"
        );
    }
}
