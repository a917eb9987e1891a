use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use cosmo_catalog::{NewScientist, ScientistPatch, repository};
use cosmo_database::Database;
use cosmo_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> (Router, Database) {
    let db = Database::builder()
        .in_memory()
        .schema(cosmo_catalog::SCHEMA)
        .init()
        .expect("in-memory database");
    let state = ApiState::builder().db(db.clone()).build().expect("api state");
    let (router, _api_doc) = cosmo_catalog::router().with_state(state).split_for_parts();
    (router, db)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn seed_planet(db: &Database) -> i64 {
    repository::insert_planet(db, "Mars", 225, "Sol").expect("seed planet").id
}

#[tokio::test]
async fn scientist_lifecycle() {
    let (router, _db) = app();

    // Create
    let (status, body) =
        send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
            .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["field_of_study"], "CS");
    assert!(body.get("missions").is_none(), "create response suppresses missions");

    // Show
    let (status, body) = send(&router, "GET", "/scientists/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["missions"], json!([]));

    // Update
    let (status, body) =
        send(&router, "PATCH", "/scientists/1", Some(json!({ "field_of_study": "Math" }))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["field_of_study"], "Math");
    assert!(body.get("missions").is_none(), "update response suppresses missions");

    // Delete
    let (status, body) = send(&router, "DELETE", "/scientists/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // Gone
    let (status, body) = send(&router, "GET", "/scientists/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Scientist not found");
}

#[tokio::test]
async fn scientist_index_returns_all_rows_in_order() {
    let (router, _db) = app();

    for (name, field) in [("Ada", "CS"), ("Marie", "Chemistry"), ("Edwin", "Astronomy")] {
        let (status, _) = send(
            &router,
            "POST",
            "/scientists",
            Some(json!({ "name": name, "field_of_study": field })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, "GET", "/scientists", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "Ada");
    assert_eq!(rows[2]["name"], "Edwin");
    assert!(rows[0].get("missions").is_none(), "index rows are scalar projections");
}

#[tokio::test]
async fn invalid_scientist_create_persists_nothing() {
    let (router, _db) = app();

    let (status, body) =
        send(&router, "POST", "/scientists", Some(json!({ "name": "", "field_of_study": "CS" })))
            .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "name must be a non-empty string");

    let (status, body) =
        send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": 42 })))
            .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "field_of_study must be a non-empty string");

    // Missing key is a deterministic validation error, not a fault.
    let (status, _) = send(&router, "POST", "/scientists", Some(json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&router, "GET", "/scientists", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_and_delete_missing_scientist_return_not_found() {
    let (router, _db) = app();

    let (status, body) =
        send(&router, "PATCH", "/scientists/42", Some(json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Scientist not found");

    let (status, body) = send(&router, "DELETE", "/scientists/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Scientist not found");
}

#[tokio::test]
async fn update_validates_all_fields_before_applying_any() {
    let (router, _db) = app();

    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    // Valid name plus invalid field_of_study: the whole update must abort.
    let (status, _) = send(
        &router,
        "PATCH",
        "/scientists/1",
        Some(json!({ "name": "Grace", "field_of_study": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&router, "GET", "/scientists/1", None).await;
    assert_eq!(body["name"], "Ada", "no partial write on failed validation");
    assert_eq!(body["field_of_study"], "CS");
}

#[test]
fn failed_update_leaves_no_partial_write() {
    let db = Database::builder()
        .in_memory()
        .schema(cosmo_catalog::SCHEMA)
        .init()
        .expect("in-memory database");
    repository::insert_scientist(
        &db,
        &NewScientist { name: "Ada".to_owned(), field_of_study: "CS".to_owned() },
    )
    .expect("seed scientist");

    // Simulate a store fault on one of the patched columns.
    db.with_conn(|conn| {
        conn.execute_batch(
            "CREATE TRIGGER freeze_field_of_study
             BEFORE UPDATE OF field_of_study ON scientists
             BEGIN SELECT RAISE(ABORT, 'field_of_study is frozen'); END;",
        )
    })
    .expect("trigger");

    let patch = ScientistPatch {
        name: Some("Grace".to_owned()),
        field_of_study: Some("Math".to_owned()),
    };
    assert!(repository::update_scientist(&db, 1, &patch).is_err(), "update must fail");

    let row = repository::find_scientist(&db, 1).expect("query").expect("row");
    assert_eq!(row.name, "Ada", "a failed update must not persist any field");
    assert_eq!(row.field_of_study, "CS");
}

#[tokio::test]
async fn update_rejects_fields_outside_the_allow_list() {
    let (router, _db) = app();

    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    let (status, body) = send(&router, "PATCH", "/scientists/1", Some(json!({ "id": 99 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "unknown field: id");

    let (_, body) = send(&router, "GET", "/scientists/1", None).await;
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn planet_index_returns_scalar_projections() {
    let (router, db) = app();
    repository::insert_planet(&db, "Mars", 225, "Sol").expect("seed");
    repository::insert_planet(&db, "Proxima b", 40_000_000, "Proxima Centauri").expect("seed");

    let (status, body) = send(&router, "GET", "/planets", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Mars");
    assert_eq!(rows[0]["distance_from_earth"], 225);
    assert_eq!(rows[0]["nearest_star"], "Sol");
    assert!(rows[0].get("missions").is_none(), "planet rows suppress relations");
    assert!(rows[0].get("scientists").is_none(), "planet rows suppress relations");
}

#[tokio::test]
async fn mission_create_nests_parent_summaries() {
    let (router, db) = app();
    let planet_id = seed_planet(&db);
    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    let (status, body) = send(
        &router,
        "POST",
        "/missions",
        Some(json!({ "name": "Mars One", "scientist_id": 1, "planet_id": planet_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Mars One");
    assert_eq!(body["scientist"]["name"], "Ada");
    assert_eq!(body["planet"]["name"], "Mars");
    assert!(body["scientist"].get("missions").is_none(), "no cyclic back-reference");
    assert!(body["planet"].get("missions").is_none(), "no cyclic back-reference");

    // The mission shows up under its scientist as a flat record.
    let (_, body) = send(&router, "GET", "/scientists/1", None).await;
    assert_eq!(body["missions"][0]["name"], "Mars One");
    assert!(body["missions"][0].get("scientist").is_none(), "nested missions stay flat");
}

#[tokio::test]
async fn mission_with_non_integer_id_is_rejected() {
    let (router, db) = app();
    let planet_id = seed_planet(&db);
    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    let (status, body) = send(
        &router,
        "POST",
        "/missions",
        Some(json!({ "name": "Mars One", "scientist_id": "abc", "planet_id": planet_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"], "scientist_id must be an integer");

    let missions = repository::missions_for_scientist(&db, 1).expect("query");
    assert!(missions.is_empty(), "rejected mission must not persist");
}

#[tokio::test]
async fn mission_referencing_missing_parent_is_rejected() {
    let (router, db) = app();
    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    let (status, body) = send(
        &router,
        "POST",
        "/missions",
        Some(json!({ "name": "Mars One", "scientist_id": 1, "planet_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("errors").is_some(), "constraint failure uses the validation envelope");

    let missions = repository::missions_for_scientist(&db, 1).expect("query");
    assert!(missions.is_empty(), "rejected mission must not persist");
}

#[tokio::test]
async fn deleting_a_scientist_cascades_to_its_missions() {
    let (router, db) = app();
    let planet_id = seed_planet(&db);
    send(&router, "POST", "/scientists", Some(json!({ "name": "Ada", "field_of_study": "CS" })))
        .await;

    for name in ["Mars One", "Mars Two", "Mars Three"] {
        let (status, _) = send(
            &router,
            "POST",
            "/missions",
            Some(json!({ "name": name, "scientist_id": 1, "planet_id": planet_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(repository::missions_for_scientist(&db, 1).expect("query").len(), 3);

    let (status, _) = send(&router, "DELETE", "/scientists/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let missions = repository::missions_for_scientist(&db, 1).expect("query");
    assert!(missions.is_empty(), "cascade must remove every owned mission");
}
