//! Catalog feature slice.
//!
//! Owns the three catalog entities (scientists, planets, missions), the
//! validation rules applied before any write, and the per-endpoint
//! projections used to serialize reads without cyclic back-references.

mod error;
mod model;
pub mod repository;
mod routes;
mod schema;
mod validate;

pub use error::CatalogError;
pub use model::{
    MissionDetail, MissionRecord, NewMission, NewScientist, PlanetSummary, ScientistDetail,
    ScientistPatch, ScientistSummary,
};
pub use routes::router;
pub use schema::SCHEMA;
