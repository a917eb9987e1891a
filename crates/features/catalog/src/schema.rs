//! Catalog schema, applied by the server at startup.
//!
//! Missions are the join table between scientists and planets; both foreign
//! keys are `NOT NULL` and cascade on parent deletion, so no orphan mission
//! can exist.

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS scientists (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    field_of_study  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS planets (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    name                 TEXT NOT NULL,
    distance_from_earth  INTEGER NOT NULL,
    nearest_star         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS missions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    scientist_id  INTEGER NOT NULL REFERENCES scientists(id) ON DELETE CASCADE,
    planet_id     INTEGER NOT NULL REFERENCES planets(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS ix_missions_scientist_id ON missions(scientist_id);
CREATE INDEX IF NOT EXISTS ix_missions_planet_id ON missions(planet_id);
";
