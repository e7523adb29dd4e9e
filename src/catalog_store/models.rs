//! Catalog entity models.
//!
//! Relations between entities are encoded as id lists stored directly on the
//! records (a movie carries its genre ids, a genre carries its movie ids)
//! rather than through junction tables. The resolver expands those lists
//! into the `Resolved*` composite shapes below.

use serde::{Deserialize, Serialize};

// =============================================================================
// Core Entities
// =============================================================================

/// Movie entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub released_year: i32,
    pub maturity_rating_id: String,
    /// Genre ids in the order the operator supplied them.
    pub genre_ids: Vec<String>,
    pub image: String,
    pub added_at: i64,
}

/// Series entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre_ids: Vec<String>,
    pub added_at: i64,
}

/// Genre for movies, carrying the ids of the movies filed under it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieGenre {
    pub id: String,
    pub name: String,
    pub movie_ids: Vec<String>,
    pub added_at: i64,
}

/// Genre for series, symmetric to [`MovieGenre`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesGenre {
    pub id: String,
    pub name: String,
    pub series_ids: Vec<String>,
    pub added_at: i64,
}

/// Maturity rating. Stores no back references; its movies are found by
/// scanning for movies that point at it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaturityRating {
    pub id: String,
    pub name: String,
    pub added_at: i64,
}

// =============================================================================
// Resolved/Composite Types (API Responses)
// =============================================================================

/// Movie with its rating and genres materialized.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedMovie {
    pub movie: Movie,
    /// None when the stored rating id no longer resolves.
    pub maturity_rating: Option<MaturityRating>,
    pub genres: Vec<MovieGenre>,
}

/// Series with its genres materialized.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedSeries {
    pub series: Series,
    pub genres: Vec<SeriesGenre>,
}

/// Movie genre with its movies materialized.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedMovieGenre {
    pub genre: MovieGenre,
    pub movies: Vec<Movie>,
}

/// Series genre with its series materialized.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedSeriesGenre {
    pub genre: SeriesGenre,
    pub series: Vec<Series>,
}

/// Maturity rating with the movies that carry it.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedMaturityRating {
    pub rating: MaturityRating,
    pub movies: Vec<Movie>,
}

// =============================================================================
// Create Requests
// =============================================================================

/// Create request for a movie.
///
/// Every scalar field is optional at the wire level; "not supplied" is `None`
/// (distinct from an empty string). The mutation layer decides which fields
/// are actually required. `released_year` arrives as the operator typed it
/// and is parsed strictly before persistence.
#[derive(Debug, Deserialize)]
pub struct NewMovieRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub released_year: Option<String>,
    pub maturity_rating_id: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSeriesRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewMovieGenreRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub movie_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSeriesGenreRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub series_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewMaturityRatingRequest {
    pub name: Option<String>,
}
