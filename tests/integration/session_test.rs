//! Integration tests for the session layer: transparent refresh,
//! single-flight rotation, and the authenticated content proxy.

mod helpers;

use http::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn article_fixture() -> serde_json::Value {
    serde_json::json!([{
        "type": "node--article",
        "id": "a1b2",
        "attributes": { "title": "Hello" },
    }])
}

#[tokio::test]
async fn valid_access_token_proxies_without_refreshing() {
    let app = helpers::TestApp::new().await;
    app.mount_articles(article_fixture()).await;

    let token = helpers::fresh_access_token();
    let response = app
        .request(
            "GET",
            "/api/articles",
            None,
            Some(&format!("access_token={token}; refresh_token=RT1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"][0]["attributes"]["title"], "Hello");
    assert_eq!(response.body["pagination"]["page"], 1);
    assert_eq!(app.upstream_hits("/oauth/token").await, 0);
    // No rotation happened, so no cookies change.
    assert!(response.cookie_value("access_token").is_none());

    // Every upstream call carried the bearer token.
    let requests = app.upstream.received_requests().await.unwrap();
    for request in &requests {
        assert_eq!(
            request.headers.get("authorization").unwrap().to_str().unwrap(),
            format!("Bearer {token}"),
        );
    }
}

#[tokio::test]
async fn expired_access_token_refreshes_once_and_proceeds() {
    let app = helpers::TestApp::new().await;

    let rotated = helpers::fresh_access_token();
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": rotated.clone(),
            "refresh_token": "RT2",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;
    app.mount_articles(article_fixture()).await;

    let expired = helpers::expired_access_token();
    let response = app
        .request(
            "GET",
            "/api/articles",
            None,
            Some(&format!("access_token={expired}; refresh_token=RT1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    // The rotated pair is persisted on the response.
    assert_eq!(
        response.cookie_value("access_token").as_deref(),
        Some(rotated.as_str())
    );
    assert_eq!(response.cookie_value("refresh_token").as_deref(), Some("RT2"));

    // The proxied request used the new access token, not the expired one.
    let requests = app.upstream.received_requests().await.unwrap();
    let article_auth: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/jsonapi/node/article")
        .map(|r| r.headers.get("authorization").unwrap().to_str().unwrap().to_string())
        .collect();
    assert!(!article_auth.is_empty());
    for auth in article_auth {
        assert_eq!(auth, format!("Bearer {rotated}"));
    }
}

#[tokio::test]
async fn concurrent_requests_share_a_single_refresh() {
    let app = helpers::TestApp::new().await;

    let rotated = helpers::fresh_access_token();
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": rotated.clone(),
            "refresh_token": "RT2",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;
    app.mount_articles(article_fixture()).await;

    let expired = helpers::expired_access_token();
    let cookies = format!("access_token={expired}; refresh_token=RT1");

    let (first, second) = tokio::join!(
        app.request("GET", "/api/articles", None, Some(&cookies)),
        app.request("GET", "/api/articles", None, Some(&cookies)),
    );

    // Both racers succeed: the loser receives the winner's rotated pair
    // instead of being forced to re-authenticate.
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.upstream_hits("/oauth/token").await, 1);
}

#[tokio::test]
async fn refresh_rejection_on_a_guarded_route_forces_reauthentication() {
    let app = helpers::TestApp::new().await;
    app.mount_token_failure(
        401,
        serde_json::json!({ "error": "invalid_grant", "error_description": "Token revoked" }),
    )
    .await;

    let expired = helpers::expired_access_token();
    let response = app
        .request(
            "GET",
            "/api/articles",
            None,
            Some(&format!("access_token={expired}; refresh_token=STALE")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["requiresLogin"], true);
    assert_eq!(response.cookie_value("access_token").as_deref(), Some(""));
}

#[tokio::test]
async fn guarded_route_without_cookies_is_not_authenticated() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/articles", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "NOT_AUTHENTICATED");
    assert_eq!(app.upstream_hits("/oauth/token").await, 0);
}

#[tokio::test]
async fn backend_401_surfaces_as_authentication_expired() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/article"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.upstream)
        .await;

    let token = helpers::fresh_access_token();
    let response = app
        .request(
            "GET",
            "/api/articles",
            None,
            Some(&format!("access_token={token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION_EXPIRED");
}

#[tokio::test]
async fn me_reports_decoded_claims() {
    let app = helpers::TestApp::new().await;

    let token = helpers::fresh_access_token();
    let response = app
        .request(
            "GET",
            "/api/me",
            None,
            Some(&format!("access_token={token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "12");
    let scopes = response.body["scopes"].as_array().unwrap();
    assert!(scopes.contains(&serde_json::json!("editor")));
    assert!(scopes.contains(&serde_json::json!("publisher")));
}
