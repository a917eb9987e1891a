//! SQL access for the catalog.
//!
//! Every function runs inside a single [`Database::with_conn`] call, so one
//! request performs at most one logical transaction against the store.

use crate::error::CatalogError;
use crate::model::{
    MissionDetail, MissionRecord, NewMission, NewScientist, PlanetSummary, ScientistDetail,
    ScientistPatch, ScientistSummary,
};
use cosmo_database::Database;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn scientist_row(row: &Row<'_>) -> rusqlite::Result<ScientistSummary> {
    Ok(ScientistSummary { id: row.get(0)?, name: row.get(1)?, field_of_study: row.get(2)? })
}

fn mission_row(row: &Row<'_>) -> rusqlite::Result<MissionRecord> {
    Ok(MissionRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        scientist_id: row.get(2)?,
        planet_id: row.get(3)?,
    })
}

fn planet_row(row: &Row<'_>) -> rusqlite::Result<PlanetSummary> {
    Ok(PlanetSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        distance_from_earth: row.get(2)?,
        nearest_star: row.get(3)?,
    })
}

fn select_scientist(conn: &Connection, id: i64) -> rusqlite::Result<Option<ScientistSummary>> {
    conn.query_row(
        "SELECT id, name, field_of_study FROM scientists WHERE id = ?1",
        [id],
        scientist_row,
    )
    .optional()
}

/// All scientists, scalar fields only, ordered by id.
pub fn list_scientists(db: &Database) -> Result<Vec<ScientistSummary>, CatalogError> {
    let scientists = db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT id, name, field_of_study FROM scientists ORDER BY id")?;
        let rows = stmt.query_map([], scientist_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
    })?;
    Ok(scientists)
}

/// Persists a validated scientist and returns the stored record.
pub fn insert_scientist(
    db: &Database,
    new: &NewScientist,
) -> Result<ScientistSummary, CatalogError> {
    let scientist = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO scientists (name, field_of_study) VALUES (?1, ?2)",
            params![new.name, new.field_of_study],
        )?;
        Ok(ScientistSummary {
            id: conn.last_insert_rowid(),
            name: new.name.clone(),
            field_of_study: new.field_of_study.clone(),
        })
    })?;
    Ok(scientist)
}

/// Scientist with its missions, or `None` when the id does not exist.
pub fn find_scientist(db: &Database, id: i64) -> Result<Option<ScientistDetail>, CatalogError> {
    let detail = db.with_conn(|conn| {
        let Some(scientist) = select_scientist(conn, id)? else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT id, name, scientist_id, planet_id FROM missions
             WHERE scientist_id = ?1 ORDER BY id",
        )?;
        let missions =
            stmt.query_map([id], mission_row)?.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(ScientistDetail {
            id: scientist.id,
            name: scientist.name,
            field_of_study: scientist.field_of_study,
            missions,
        }))
    })?;
    Ok(detail)
}

/// Applies a pre-validated patch and returns the updated record, or `None`
/// when the id does not exist. The patch was validated in full beforehand and
/// lands as one `UPDATE` statement, so a store-level failure leaves no
/// partial write.
pub fn update_scientist(
    db: &Database,
    id: i64,
    patch: &ScientistPatch,
) -> Result<Option<ScientistSummary>, CatalogError> {
    let updated = db.with_conn(|conn| {
        if select_scientist(conn, id)?.is_none() {
            return Ok(None);
        }

        if patch.name.is_some() || patch.field_of_study.is_some() {
            conn.execute(
                "UPDATE scientists
                 SET name = COALESCE(?1, name),
                     field_of_study = COALESCE(?2, field_of_study)
                 WHERE id = ?3",
                params![patch.name, patch.field_of_study, id],
            )?;
        }

        select_scientist(conn, id)
    })?;
    Ok(updated)
}

/// Deletes a scientist; missions cascade at the store level. Returns whether
/// a row was removed.
pub fn delete_scientist(db: &Database, id: i64) -> Result<bool, CatalogError> {
    let removed =
        db.with_conn(|conn| conn.execute("DELETE FROM scientists WHERE id = ?1", [id]))?;
    Ok(removed > 0)
}

/// All planets, scalar fields only, ordered by id.
pub fn list_planets(db: &Database) -> Result<Vec<PlanetSummary>, CatalogError> {
    let planets = db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets ORDER BY id",
        )?;
        let rows = stmt.query_map([], planet_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
    })?;
    Ok(planets)
}

/// Inserts a planet. There is no HTTP surface for this; it exists for seeds
/// and test fixtures.
pub fn insert_planet(
    db: &Database,
    name: &str,
    distance_from_earth: i64,
    nearest_star: &str,
) -> Result<PlanetSummary, CatalogError> {
    let planet = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO planets (name, distance_from_earth, nearest_star) VALUES (?1, ?2, ?3)",
            params![name, distance_from_earth, nearest_star],
        )?;
        Ok(PlanetSummary {
            id: conn.last_insert_rowid(),
            name: name.to_owned(),
            distance_from_earth,
            nearest_star: nearest_star.to_owned(),
        })
    })?;
    Ok(planet)
}

/// Persists a validated mission and returns it with both parents nested as
/// scalar summaries. A foreign key to a missing parent surfaces as a
/// constraint violation and is translated by [`CatalogError::from`].
pub fn insert_mission(db: &Database, new: &NewMission) -> Result<MissionDetail, CatalogError> {
    let mission = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO missions (name, scientist_id, planet_id) VALUES (?1, ?2, ?3)",
            params![new.name, new.scientist_id, new.planet_id],
        )?;
        let id = conn.last_insert_rowid();

        // Both parents exist: the insert above would have failed otherwise.
        let scientist = conn.query_row(
            "SELECT id, name, field_of_study FROM scientists WHERE id = ?1",
            [new.scientist_id],
            scientist_row,
        )?;
        let planet = conn.query_row(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets WHERE id = ?1",
            [new.planet_id],
            planet_row,
        )?;

        Ok(MissionDetail {
            id,
            name: new.name.clone(),
            scientist_id: new.scientist_id,
            planet_id: new.planet_id,
            scientist,
            planet,
        })
    })?;
    Ok(mission)
}

/// Missions referencing the given scientist (cascade verification helper).
pub fn missions_for_scientist(
    db: &Database,
    scientist_id: i64,
) -> Result<Vec<MissionRecord>, CatalogError> {
    let missions = db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, scientist_id, planet_id FROM missions
             WHERE scientist_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([scientist_id], mission_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
    })?;
    Ok(missions)
}
