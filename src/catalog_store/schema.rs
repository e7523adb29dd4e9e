//! SQLite schema definitions for the catalog database.
//!
//! Primary keys are integer rowids with unique text ids for lookups.
//! Relation id lists (`genre_ids`, `movie_ids`, `series_ids`) are stored as
//! JSON arrays in TEXT columns on the owning record; there are no junction
//! tables and no foreign keys. The maturity rating -> movies edge is not
//! materialized at all and is answered by scanning `movies`.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Core Tables
// =============================================================================

const MOVIES_TABLE: Table = Table {
    name: "movies",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("released_year", &SqlType::Integer, non_null = true),
        sqlite_column!("maturity_rating_id", &SqlType::Text, non_null = true),
        sqlite_column!("genre_ids", &SqlType::Text, non_null = true), // JSON array of genre ids
        sqlite_column!("image", &SqlType::Text, non_null = true),
        sqlite_column!("added_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_movies_id", "id"),
        ("idx_movies_rating", "maturity_rating_id"),
    ],
    unique_constraints: &[&["id"]],
};

const SERIES_TABLE: Table = Table {
    name: "series",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("genre_ids", &SqlType::Text, non_null = true), // JSON array of genre ids
        sqlite_column!("added_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_series_id", "id")],
    unique_constraints: &[&["id"]],
};

const MOVIE_GENRES_TABLE: Table = Table {
    name: "movie_genres",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("movie_ids", &SqlType::Text, non_null = true), // JSON array of movie ids
        sqlite_column!("added_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_movie_genres_id", "id")],
    unique_constraints: &[&["id"]],
};

const SERIES_GENRES_TABLE: Table = Table {
    name: "series_genres",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("series_ids", &SqlType::Text, non_null = true), // JSON array of series ids
        sqlite_column!("added_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_series_genres_id", "id")],
    unique_constraints: &[&["id"]],
};

const MATURITY_RATINGS_TABLE: Table = Table {
    name: "maturity_ratings",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("added_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_maturity_ratings_id", "id")],
    unique_constraints: &[&["id"]],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        MOVIES_TABLE,
        SERIES_TABLE,
        MOVIE_GENRES_TABLE,
        SERIES_GENRES_TABLE,
        MATURITY_RATINGS_TABLE,
    ],
    migration: None,
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_creates_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &CATALOG_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        schema.validate(&conn).unwrap();
    }

    #[test]
    fn test_insert_movie_with_genre_id_list() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &CATALOG_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();

        conn.execute(
            "INSERT INTO movies (id, title, description, released_year, maturity_rating_id, genre_ids, image, added_at)
             VALUES ('m1', 'Example', 'desc', 2020, 'r1', '[\"g1\",\"g2\"]', 'http://x/y.png', 0)",
            [],
        )
        .unwrap();

        let genre_ids: String = conn
            .query_row("SELECT genre_ids FROM movies WHERE id = 'm1'", [], |r| {
                r.get(0)
            })
            .unwrap();
        let parsed: Vec<String> = serde_json::from_str(&genre_ids).unwrap();
        assert_eq!(parsed, vec!["g1", "g2"]);
    }

    #[test]
    fn test_duplicate_id_rejected_by_unique_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &CATALOG_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();

        conn.execute(
            "INSERT INTO maturity_ratings (id, name, added_at) VALUES ('r1', 'PG-13', 0)",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO maturity_ratings (id, name, added_at) VALUES ('r1', 'R', 0)",
            [],
        );
        assert!(result.is_err());
    }
}
