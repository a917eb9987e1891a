use axum::body::Body;
use axum::http::{Request, StatusCode};
use cosmo_database::Database;
use cosmo_kernel::server::router::system_router;
use cosmo_kernel::server::{ApiState, ApiStateError};
use tower::ServiceExt;

#[tokio::test]
async fn home_responds_with_empty_body() {
    let (router, _api_doc) = system_router::<()>().split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn health_reports_up() {
    let (router, _api_doc) = system_router::<()>().split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["status"], "up");
}

#[test]
fn state_requires_a_database() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn state_exposes_config_and_database() {
    let db = Database::builder().in_memory().init().expect("in-memory database");
    let state = ApiState::builder().db(db).build().expect("api state");
    assert_eq!(state.config.server.port, 5555);
    assert_eq!(state.database.location(), ":memory:");
}

#[test]
fn substates_extract_via_from_ref() {
    use axum::extract::FromRef;
    use cosmo_kernel::prelude::ApiConfig;

    let db = Database::builder().in_memory().init().expect("in-memory database");
    let state = ApiState::builder().db(db).build().expect("api state");

    // The injection contract handlers rely on: both substates are extractable.
    let cfg = ApiConfig::from_ref(&state);
    assert_eq!(cfg.server.port, 5555);

    let db = Database::from_ref(&state);
    assert_eq!(db.location(), ":memory:");
}
