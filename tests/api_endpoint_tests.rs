//! HTTP endpoint tests
//!
//! The full router runs over the in-memory catalog and a scripted registry,
//! driven request by request with `oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::time::Duration;
use tower::ServiceExt;

use common::{
    authenticated_request, extract_json_response, TestApp, TestAppOptions, JWT_SECRET,
};
use registry_catalog::api::middleware::auth::Claims;
use registry_catalog::domain::entities::ActivityKind;
use registry_catalog::domain::value_objects::{NamespaceRef, Visibility};
use registry_catalog::ports::{FeatureFlags, RegistryError};

async fn send(app: &TestApp, method: Method, uri: &str) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(authenticated_request(method, uri))
        .await
        .unwrap()
}

fn user_token(namespaces: Vec<i64>) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "user-42".to_string(),
        exp: now + 600,
        iat: now,
        roles: vec!["user".to_string()],
        namespaces,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Authentication and ambient behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_test_health_needs_no_auth() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    assert_eq!(json["database"], "in-memory");
}

#[tokio::test]
async fn api_test_missing_credentials_rejected() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/repositories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = extract_json_response(response).await;
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn api_test_wrong_api_key_rejected() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/repositories")
                .header("authorization", "ApiKey nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_test_responses_carry_request_id() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/repositories")
                .header("authorization", format!("ApiKey {}", common::API_KEY))
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn api_test_openapi_document_served() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    assert!(json["paths"]["/api/v1/repositories/{id}"].is_object());
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_test_list_repositories() {
    let app = TestApp::new();
    for name in ["busybox", "alpine", "debian"] {
        app.seed_repository(name);
    }

    let response = send(&app, Method::GET, "/api/v1/repositories").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    let repositories = json.as_array().unwrap();
    assert_eq!(repositories.len(), 3);
    assert_eq!(repositories[0]["name"], "busybox");
    assert!(repositories[0].get("tags").is_none());
}

#[tokio::test]
async fn api_test_list_repositories_hides_private_namespaces() {
    let app = TestApp::new();
    app.seed_repository("busybox");
    let private = app.seed_repository_in(
        "secret",
        NamespaceRef::new(7, "team", Visibility::Private).unwrap(),
    );

    let list_as = |token: String| {
        app.router.clone().oneshot(
            Request::builder()
                .uri("/api/v1/repositories")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
    };

    let outsider = extract_json_response(list_as(user_token(vec![])).await.unwrap()).await;
    assert_eq!(outsider.as_array().unwrap().len(), 1);

    let member = extract_json_response(list_as(user_token(vec![7])).await.unwrap()).await;
    let ids: Vec<i64> = member
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&private.id().as_i64()));
}

#[tokio::test]
async fn api_test_get_repository() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    app.seed_tag(repository.id(), "latest", "1");

    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    assert_eq!(json["id"], repository.id().as_i64());
    assert_eq!(json["full_name"], "public/busybox");
    assert_eq!(json["namespace"]["name"], "public");
    assert!(json.get("tags").is_none());
}

#[tokio::test]
async fn api_test_get_missing_repository() {
    let app = TestApp::new();

    for uri in ["/api/v1/repositories/222", "/api/v1/repositories/not-a-number"] {
        let response = send(&app, Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = extract_json_response(response).await;
        assert_eq!(json["message"], "Repository not found");
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_test_list_tags() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    for name in ["latest", "v1", "v2"] {
        app.seed_tag(repository.id(), name, "1");
    }

    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/repositories/{}/tags", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["latest", "v1", "v2"]);
}

#[tokio::test]
async fn api_test_list_tags_of_missing_repository() {
    let app = TestApp::new();

    let response = send(&app, Method::GET, "/api/v1/repositories/999/tags").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_test_get_tag() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    let tag = app.seed_tag(repository.id(), "latest", "sha256:abc");

    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/repositories/{}/tags/{}", repository.id(), tag.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    assert_eq!(json["name"], "latest");
    assert_eq!(json["digest"], "sha256:abc");
    assert_eq!(json["author"]["username"], "admin");
    assert_eq!(json["repository_id"], repository.id().as_i64());
    assert!(json.get("repository").is_none());
}

#[tokio::test]
async fn api_test_get_tag_not_found() {
    let app = TestApp::new();
    let busybox = app.seed_repository("busybox");
    let alpine = app.seed_repository("alpine");
    let foreign = app.seed_tag(alpine.id(), "latest", "1");

    let uris = [
        format!("/api/v1/repositories/{}/tags/999", busybox.id()),
        format!("/api/v1/repositories/{}/tags/{}", busybox.id(), foreign.id()),
        format!("/api/v1/repositories/999/tags/{}", foreign.id()),
        format!("/api/v1/repositories/{}/tags/latest", busybox.id()),
    ];

    for uri in uris {
        let response = send(&app, Method::GET, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn api_test_grouped_tags() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    for i in 0..4 {
        app.seed_tag(repository.id(), &format!("tag{}", i), "123123");
    }
    // Created last, so its group comes first
    app.seed_tag(repository.id(), "lonely", "1");

    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/repositories/{}/tags/grouped", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    let groups = json.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].as_array().unwrap().len(), 1);
    assert_eq!(groups[0][0]["name"], "lonely");
    assert_eq!(groups[1].as_array().unwrap().len(), 4);
    assert!(groups[1]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["digest"] == "123123"));
}

#[tokio::test]
async fn api_test_grouped_tags_of_missing_repository() {
    let app = TestApp::new();

    let response = send(&app, Method::GET, "/api/v1/repositories/999/tags/grouped").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_test_delete_disabled_is_forbidden() {
    let app = TestApp::with_delete_disabled();
    let repository = app.seed_repository("busybox");
    let tag = app.seed_tag(repository.id(), "latest", "1");

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(extract_json_response(response).await["message"].is_string());
    assert!(app.registry.calls().is_empty());
    assert!(app.tag_exists(tag.id()).await);

    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_test_delete_missing_repository_regardless_of_flag() {
    for app in [TestApp::new(), TestApp::with_delete_disabled()] {
        let response = send(&app, Method::DELETE, "/api/v1/repositories/999").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn api_test_delete_empty_repository() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    let uri = format!("/api/v1/repositories/{}", repository.id());

    let response = send(&app, Method::DELETE, &uri).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());

    let response = send(&app, Method::GET, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_test_delete_repository_with_tags() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    for name in ["latest", "v1", "v2"] {
        app.seed_tag(repository.id(), name, "1");
    }

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.registry.calls().len(), 3);
    assert_eq!(app.catalog.tag_count(), 0);
    assert!(!app.repository_exists(repository.id()).await);

    let kinds: Vec<ActivityKind> = app.activities.entries().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds.iter().filter(|k| **k == ActivityKind::TagDelete).count(),
        3
    );
    assert_eq!(kinds.last(), Some(&ActivityKind::RepositoryDelete));
}

#[tokio::test]
async fn api_test_delete_with_failing_tag() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    let kept = app.seed_tag(repository.id(), "taggg", "1");
    let removed = app.seed_tag(repository.id(), "latest", "2");
    app.registry.fail_tag(
        "taggg",
        RegistryError::Remote {
            status: 500,
            message: "I AM ERROR.".to_string(),
        },
    );

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = extract_json_response(response).await;
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("could not remove taggg tag"));
    assert!(!message.contains("latest"));

    // Partial state is final: the failed tag and the repository stay
    assert!(app.repository_exists(repository.id()).await);
    assert!(app.tag_exists(kept.id()).await);
    assert!(!app.tag_exists(removed.id()).await);
}

#[tokio::test]
async fn api_test_delete_with_single_failing_tag_keeps_everything() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    let tag = app.seed_tag(repository.id(), "only", "1");
    app.registry
        .fail_tag("only", RegistryError::Timeout(Duration::from_secs(30)));

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = extract_json_response(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("could not remove only tag"));
    assert!(app.repository_exists(repository.id()).await);
    assert!(app.tag_exists(tag.id()).await);
}

#[tokio::test]
async fn api_test_delete_refused_by_store() {
    let app = TestApp::with_options(TestAppOptions {
        refuse_repository_delete: true,
        ..TestAppOptions::default()
    });
    let repository = app.seed_repository("busybox");
    app.seed_tag(repository.id(), "latest", "1");
    app.seed_tag(repository.id(), "v1", "1");

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/repositories/{}", repository.id()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(extract_json_response(response).await["message"]
        .as_str()
        .unwrap()
        .contains("could not remove repository"));
    assert_eq!(app.catalog.tag_count(), 0);
    assert!(app.repository_exists(repository.id()).await);
}

#[tokio::test]
async fn api_test_delete_flag_read_per_request() {
    let app = TestApp::with_delete_disabled();
    let repository = app.seed_repository("busybox");
    let uri = format!("/api/v1/repositories/{}", repository.id());

    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.flags.set_delete_enabled(true);

    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn api_test_retry_after_partial_failure() {
    let app = TestApp::new();
    let repository = app.seed_repository("busybox");
    app.seed_tag(repository.id(), "taggg", "1");
    app.seed_tag(repository.id(), "latest", "2");
    app.registry.fail_tag(
        "taggg",
        RegistryError::Unreachable("connection refused".to_string()),
    );
    let uri = format!("/api/v1/repositories/{}", repository.id());

    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.catalog.tag_count(), 1);

    // Second attempt only touches what is left; the script still fails it
    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        app.registry.calls().iter().filter(|c| c.ends_with(":latest")).count(),
        1
    );
}

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

fn settings_update(authorization: &str, enabled: bool) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/settings/delete")
        .header("authorization", authorization)
        .header("content-type", "application/json")
        .body(Body::from(format!("{{\"enabled\": {}}}", enabled)))
        .unwrap()
}

#[tokio::test]
async fn api_test_read_delete_settings() {
    let app = TestApp::with_delete_disabled();

    let response = send(&app, Method::GET, "/api/v1/settings/delete").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json_response(response).await;
    assert_eq!(body["enabled"], false);
    assert_eq!(body["concurrency"], 4);
}

#[tokio::test]
async fn api_test_admin_enables_deletion_at_runtime() {
    let app = TestApp::with_delete_disabled();
    let repository = app.seed_repository("busybox");
    let uri = format!("/api/v1/repositories/{}", repository.id());

    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .router
        .clone()
        .oneshot(settings_update(&format!("ApiKey {}", common::API_KEY), true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json_response(response).await["enabled"], true);

    let response = send(&app, Method::DELETE, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn api_test_non_admin_cannot_change_settings() {
    let app = TestApp::with_delete_disabled();

    let response = app
        .router
        .clone()
        .oneshot(settings_update(
            &format!("Bearer {}", user_token(vec![])),
            true,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!app.flags.delete_settings().enabled);
}
