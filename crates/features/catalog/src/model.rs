//! Projection and input types for the catalog.
//!
//! Each response shape is an explicit struct chosen per endpoint, so the
//! no-cycle contract is a property of the types: a mission nested under a
//! scientist is a flat [`MissionRecord`], and a [`MissionDetail`] nests only
//! scalar summaries of its parents.

use serde::Serialize;
use utoipa::ToSchema;

/// Scientist reduced to scalar fields (index, create, and update responses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScientistSummary {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

/// Scientist with its missions (show response). Missions do not re-nest the
/// scientist.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScientistDetail {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub missions: Vec<MissionRecord>,
}

/// Mission scalar fields, without parent records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissionRecord {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

/// Planet reduced to scalar fields (index response).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanetSummary {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

/// Mission with scalar summaries of both parents (create response).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissionDetail {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistSummary,
    pub planet: PlanetSummary,
}

/// Validated input for scientist creation.
#[derive(Debug, Clone)]
pub struct NewScientist {
    pub name: String,
    pub field_of_study: String,
}

/// Validated partial update for a scientist. Only allow-listed fields are
/// patchable; identity is not.
#[derive(Debug, Clone, Default)]
pub struct ScientistPatch {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

/// Validated input for mission creation. Referential integrity of the two
/// ids is left to the store's foreign-key constraints.
#[derive(Debug, Clone)]
pub struct NewMission {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}
