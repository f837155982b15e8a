//! Failure classification through the request pipeline
//!
//! Every failing request must surface exactly one notice and propagate
//! a rejection of the matching kind; only session invalidation may
//! touch the session or force navigation.

mod common;

use common::{credentials, harness, login_success_body, Harness};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use community_client::{ClientError, NoticeLevel, StateStore};

/// Sign the harness client in against a one-shot login mock.
async fn sign_in(h: &Harness) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()))
        .mount(&h.server)
        .await;
    h.client.login(&credentials()).await.expect("login");
}

/// The kind-checking helper: unwrap the propagated anyhow error back
/// into the client taxonomy.
fn kind(error: &anyhow::Error) -> &ClientError {
    error
        .downcast_ref::<ClientError>()
        .expect("error should be a ClientError")
}

#[tokio::test]
async fn success_passes_envelope_data_through_unchanged() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/club/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "成功",
            "data": [
                {"id": 1, "name": "篮球社", "memberCount": 30},
                {"id": 2, "name": "摄影社", "memberCount": 12}
            ]
        })))
        .mount(&h.server)
        .await;

    let clubs = h.client.clubs().await.expect("clubs");
    assert_eq!(clubs.len(), 2);
    assert_eq!(clubs[0].name, "篮球社");
    assert_eq!(clubs[1].member_count, Some(12));

    // Success performs no session mutation and surfaces nothing.
    assert!(!h.client.session().is_authenticated());
    assert!(h.notices.notices().is_empty());
    assert!(h.navigator.navigations().is_empty());
}

#[tokio::test]
async fn business_error_surfaces_once_and_spares_the_session() {
    let h = harness().await;
    sign_in(&h).await;

    Mock::given(method("GET"))
        .and(path("/post/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 403,
            "message": "帖子仅社团成员可见",
            "data": null
        })))
        .mount(&h.server)
        .await;

    let error = h.client.post_detail(9).await.unwrap_err();
    match kind(&error) {
        ClientError::Business { code, message } => {
            assert_eq!(*code, 403);
            assert_eq!(message, "帖子仅社团成员可见");
        }
        other => panic!("unexpected kind: {other:?}"),
    }

    // Still signed in; exactly one notice; no forced navigation.
    assert!(h.client.session().is_authenticated());
    assert_eq!(h.notices.notices().len(), 1);
    assert!(h.navigator.navigations().is_empty());
}

#[tokio::test]
async fn envelope_401_clears_session_and_redirects_to_login() {
    let h = harness().await;
    sign_in(&h).await;
    h.navigator.set_current_path("/profile");

    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 401,
            "message": "token 已过期",
            "data": null
        })))
        .mount(&h.server)
        .await;

    let error = h.client.profile().await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Auth(_)));

    assert!(!h.client.session().is_authenticated());
    assert!(h.store.get("session").expect("get").is_none());

    let navigations = h.navigator.navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].route, "Login");

    let notices = h.notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("token 已过期"));
}

#[tokio::test]
async fn session_invalid_under_admin_path_targets_admin_login() {
    let h = harness().await;
    sign_in(&h).await;
    h.navigator.set_current_path("/admin/clubs");

    Mock::given(method("GET"))
        .and(path("/club/list"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let error = h.client.clubs().await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Auth(_)));

    assert!(!h.client.session().is_authenticated());
    let navigations = h.navigator.navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].route, "AdminLogin");
}

#[tokio::test]
async fn http_403_maps_to_permission_error() {
    let h = harness().await;
    sign_in(&h).await;

    Mock::given(method("DELETE"))
        .and(path("/post/5"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    let error = h.client.delete_post(5).await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Permission(_)));

    assert!(h.client.session().is_authenticated());
    assert_eq!(h.notices.notices().len(), 1);
    assert!(h.navigator.navigations().is_empty());
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/club/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.server)
        .await;

    let error = h.client.club_detail(404).await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::NotFound(_)));
    assert_eq!(h.notices.notices().len(), 1);
}

#[tokio::test]
async fn http_500_maps_to_server_error() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/club/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let error = h.client.clubs().await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Server(_)));
    assert_eq!(h.notices.notices().len(), 1);
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let h = harness().await;

    // The harness client uses a 1-second timeout.
    Mock::given(method("GET"))
        .and(path("/club/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "message": "成功", "data": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&h.server)
        .await;

    let error = h.client.clubs().await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Timeout(_)));
    assert_eq!(h.notices.notices().len(), 1);
    assert!(h.navigator.navigations().is_empty());
}

#[tokio::test]
async fn unreachable_backend_maps_to_network_error() {
    let h = harness().await;
    let unreachable = community_client::ClientConfig {
        // A closed port: the connection is refused without a response.
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 1,
        ..Default::default()
    };
    let client = community_client::Client::new(
        unreachable,
        h.store.clone(),
        h.navigator.clone(),
    )
    .expect("client")
    .with_notices(h.notices.clone());

    let error = client.clubs().await.unwrap_err();
    assert!(matches!(kind(&error), ClientError::Network(_)));
    assert_eq!(h.notices.notices().len(), 1);
}

#[tokio::test]
async fn each_failure_surfaces_exactly_one_notice() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/club/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    for _ in 0..3 {
        let _ = h.client.clubs().await;
    }
    assert_eq!(h.notices.notices().len(), 3);
}
