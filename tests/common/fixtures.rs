//! Test fixture creation for the catalog database
//!
//! Fixtures are inserted with fixed, readable ids through the store's typed
//! insert API, with the relation id lists on both sides pre-linked the way
//! the mutation layer would have written them. MOVIE_2 deliberately carries
//! one genre id with no backing record to exercise dangling-reference
//! tolerance on the read path.

use super::constants::*;
use anyhow::Result;
use flickyard_catalog_server::catalog_store::{
    MaturityRating, Movie, MovieGenre, Series, SeriesGenre,
};
use flickyard_catalog_server::{CatalogStore, SqliteCatalogStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary catalog with 2 ratings, 3 movie genres, 2 movies,
/// 1 series genre, and 1 series. Returns (temp_dir, catalog_db_path).
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");

    let store = SqliteCatalogStore::new(&catalog_db_path)?;

    store.insert_maturity_rating(&MaturityRating {
        id: RATING_PG13_ID.to_string(),
        name: RATING_PG13_NAME.to_string(),
        added_at: 0,
    })?;
    store.insert_maturity_rating(&MaturityRating {
        id: RATING_R_ID.to_string(),
        name: RATING_R_NAME.to_string(),
        added_at: 0,
    })?;

    store.insert_movie_genre(&MovieGenre {
        id: GENRE_ACTION_ID.to_string(),
        name: GENRE_ACTION_NAME.to_string(),
        movie_ids: vec![MOVIE_1_ID.to_string()],
        added_at: 0,
    })?;
    store.insert_movie_genre(&MovieGenre {
        id: GENRE_DRAMA_ID.to_string(),
        name: GENRE_DRAMA_NAME.to_string(),
        movie_ids: vec![MOVIE_1_ID.to_string(), MOVIE_2_ID.to_string()],
        added_at: 0,
    })?;
    store.insert_movie_genre(&MovieGenre {
        id: GENRE_COMEDY_ID.to_string(),
        name: GENRE_COMEDY_NAME.to_string(),
        movie_ids: vec![],
        added_at: 0,
    })?;

    store.insert_movie(&Movie {
        id: MOVIE_1_ID.to_string(),
        title: MOVIE_1_TITLE.to_string(),
        description: "A first feature film".to_string(),
        released_year: 2020,
        maturity_rating_id: RATING_PG13_ID.to_string(),
        genre_ids: vec![GENRE_ACTION_ID.to_string(), GENRE_DRAMA_ID.to_string()],
        image: "https://example.com/first-feature.jpg".to_string(),
        added_at: 0,
    })?;
    // GENRE_GHOST_ID has no backing record
    store.insert_movie(&Movie {
        id: MOVIE_2_ID.to_string(),
        title: MOVIE_2_TITLE.to_string(),
        description: "A second feature film".to_string(),
        released_year: 2021,
        maturity_rating_id: RATING_R_ID.to_string(),
        genre_ids: vec![GENRE_DRAMA_ID.to_string(), GENRE_GHOST_ID.to_string()],
        image: "https://example.com/second-feature.jpg".to_string(),
        added_at: 0,
    })?;

    store.insert_series_genre(&SeriesGenre {
        id: SERIES_GENRE_CRIME_ID.to_string(),
        name: SERIES_GENRE_CRIME_NAME.to_string(),
        series_ids: vec![SERIES_1_ID.to_string()],
        added_at: 0,
    })?;
    store.insert_series(&Series {
        id: SERIES_1_ID.to_string(),
        title: SERIES_1_TITLE.to_string(),
        description: "A test show".to_string(),
        genre_ids: vec![SERIES_GENRE_CRIME_ID.to_string()],
        added_at: 0,
    })?;

    Ok((dir, catalog_db_path))
}
