//! HTTP surface of the catalog slice.

use crate::error::CatalogError;
use crate::model::{MissionDetail, PlanetSummary, ScientistDetail, ScientistSummary};
use crate::{repository, validate};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cosmo_database::Database;
use cosmo_domain::constants::CATALOG_TAG;
use cosmo_kernel::server::ApiState;
use serde_json::Value;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Catalog routes; state is applied by the server router.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_scientists, create_scientist))
        .routes(routes!(get_scientist, update_scientist, delete_scientist))
        .routes(routes!(list_planets))
        .routes(routes!(create_mission))
}

#[utoipa::path(
    get,
    path = "/scientists",
    responses((status = OK, description = "All scientists, scalar fields only", body = [ScientistSummary])),
    tag = CATALOG_TAG,
)]
async fn list_scientists(
    State(db): State<Database>,
) -> Result<Json<Vec<ScientistSummary>>, CatalogError> {
    Ok(Json(repository::list_scientists(&db)?))
}

#[utoipa::path(
    post,
    path = "/scientists",
    responses(
        (status = CREATED, description = "Scientist created", body = ScientistSummary),
        (status = UNPROCESSABLE_ENTITY, description = "Validation failure"),
    ),
    tag = CATALOG_TAG,
)]
async fn create_scientist(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, CatalogError> {
    let new = validate::new_scientist(&body)?;
    let scientist = repository::insert_scientist(&db, &new)?;
    info!(id = scientist.id, "Scientist created");
    Ok((StatusCode::CREATED, Json(scientist)))
}

#[utoipa::path(
    get,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist identifier")),
    responses(
        (status = OK, description = "Scientist with its missions", body = ScientistDetail),
        (status = NOT_FOUND, description = "No such scientist"),
    ),
    tag = CATALOG_TAG,
)]
async fn get_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<ScientistDetail>, CatalogError> {
    repository::find_scientist(&db, id)?
        .map(Json)
        .ok_or(CatalogError::NotFound("Scientist"))
}

#[utoipa::path(
    patch,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist identifier")),
    responses(
        (status = ACCEPTED, description = "Scientist updated", body = ScientistSummary),
        (status = NOT_FOUND, description = "No such scientist"),
        (status = UNPROCESSABLE_ENTITY, description = "Validation failure"),
    ),
    tag = CATALOG_TAG,
)]
async fn update_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, CatalogError> {
    // Validate every provided field before applying any of them.
    let patch = validate::scientist_patch(&body)?;
    let scientist = repository::update_scientist(&db, id, &patch)?
        .ok_or(CatalogError::NotFound("Scientist"))?;
    Ok((StatusCode::ACCEPTED, Json(scientist)))
}

#[utoipa::path(
    delete,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist identifier")),
    responses(
        (status = NO_CONTENT, description = "Scientist and its missions deleted"),
        (status = NOT_FOUND, description = "No such scientist"),
    ),
    tag = CATALOG_TAG,
)]
async fn delete_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, CatalogError> {
    if !repository::delete_scientist(&db, id)? {
        return Err(CatalogError::NotFound("Scientist"));
    }
    info!(id, "Scientist deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/planets",
    responses((status = OK, description = "All planets, scalar fields only", body = [PlanetSummary])),
    tag = CATALOG_TAG,
)]
async fn list_planets(
    State(db): State<Database>,
) -> Result<Json<Vec<PlanetSummary>>, CatalogError> {
    Ok(Json(repository::list_planets(&db)?))
}

#[utoipa::path(
    post,
    path = "/missions",
    responses(
        (status = CREATED, description = "Mission created", body = MissionDetail),
        (status = UNPROCESSABLE_ENTITY, description = "Validation or referential failure"),
    ),
    tag = CATALOG_TAG,
)]
async fn create_mission(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, CatalogError> {
    let new = validate::new_mission(&body)?;
    let mission = repository::insert_mission(&db, &new)?;
    info!(id = mission.id, "Mission created");
    Ok((StatusCode::CREATED, Json(mission)))
}
