//! Catalog mutations.
//!
//! This is the trust boundary for writes: required fields are re-checked
//! here even though the admin UI enforces them, referenced ids must resolve
//! before anything is persisted, and cross-references between relation
//! sides go through a single link routine per relation.
//!
//! A create is not one transaction: the record insert and the per-genre
//! cross-reference appends are individually atomic store calls. A failure
//! between them leaves the new record without some back references; the
//! error is surfaced to the caller and the read path tolerates the gap.

use super::error::CatalogError;
use super::models::*;
use super::trait_def::CatalogStore;
use chrono::Utc;
use uuid::Uuid;

fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, CatalogError> {
    match value {
        Some(v) => Ok(v.as_str()),
        None => Err(CatalogError::MissingField { field }),
    }
}

/// Strict integer parse of the operator-typed release year.
fn parse_released_year(raw: &str) -> Result<i32, CatalogError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| CatalogError::MalformedField {
            field: "released_year",
            value: raw.to_owned(),
        })
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Reference Checks
// =============================================================================

fn check_maturity_rating_exists(
    store: &dyn CatalogStore,
    id: &str,
) -> Result<(), CatalogError> {
    if store.get_maturity_rating(id)?.is_none() {
        return Err(CatalogError::Reference {
            entity: "maturity rating",
            id: id.to_owned(),
        });
    }
    Ok(())
}

fn check_movie_genres_exist(store: &dyn CatalogStore, ids: &[String]) -> Result<(), CatalogError> {
    for id in ids {
        if store.get_movie_genre(id)?.is_none() {
            return Err(CatalogError::Reference {
                entity: "movie genre",
                id: id.clone(),
            });
        }
    }
    Ok(())
}

fn check_series_genres_exist(store: &dyn CatalogStore, ids: &[String]) -> Result<(), CatalogError> {
    for id in ids {
        if store.get_series_genre(id)?.is_none() {
            return Err(CatalogError::Reference {
                entity: "series genre",
                id: id.clone(),
            });
        }
    }
    Ok(())
}

fn check_movies_exist(store: &dyn CatalogStore, ids: &[String]) -> Result<(), CatalogError> {
    for id in ids {
        if store.get_movie(id)?.is_none() {
            return Err(CatalogError::Reference {
                entity: "movie",
                id: id.clone(),
            });
        }
    }
    Ok(())
}

fn check_series_exist(store: &dyn CatalogStore, ids: &[String]) -> Result<(), CatalogError> {
    for id in ids {
        if store.get_series(id)?.is_none() {
            return Err(CatalogError::Reference {
                entity: "series",
                id: id.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Relation Maintenance
// =============================================================================

/// Sole writer of movie -> genre back references.
fn link_movie_to_genres(
    store: &dyn CatalogStore,
    movie_id: &str,
    genre_ids: &[String],
) -> Result<(), CatalogError> {
    for genre_id in genre_ids {
        store.append_movie_to_genre(genre_id, movie_id)?;
    }
    Ok(())
}

/// Sole writer of series -> genre back references.
fn link_series_to_genres(
    store: &dyn CatalogStore,
    series_id: &str,
    genre_ids: &[String],
) -> Result<(), CatalogError> {
    for genre_id in genre_ids {
        store.append_series_to_genre(genre_id, series_id)?;
    }
    Ok(())
}

// =============================================================================
// Create Operations
// =============================================================================

pub fn create_movie(
    store: &dyn CatalogStore,
    request: NewMovieRequest,
) -> Result<Movie, CatalogError> {
    let title = require(&request.title, "title")?;
    let description = require(&request.description, "description")?;
    let released_year = parse_released_year(require(&request.released_year, "released_year")?)?;
    let maturity_rating_id = require(&request.maturity_rating_id, "maturity_rating_id")?;
    let image = require(&request.image, "image")?;

    check_maturity_rating_exists(store, maturity_rating_id)?;
    check_movie_genres_exist(store, &request.genre_ids)?;

    let movie = Movie {
        id: fresh_id(),
        title: title.to_owned(),
        description: description.to_owned(),
        released_year,
        maturity_rating_id: maturity_rating_id.to_owned(),
        genre_ids: request.genre_ids,
        image: image.to_owned(),
        added_at: Utc::now().timestamp(),
    };
    store.insert_movie(&movie)?;

    link_movie_to_genres(store, &movie.id, &movie.genre_ids)?;
    Ok(movie)
}

pub fn create_series(
    store: &dyn CatalogStore,
    request: NewSeriesRequest,
) -> Result<Series, CatalogError> {
    let title = require(&request.title, "title")?;
    let description = require(&request.description, "description")?;

    check_series_genres_exist(store, &request.genre_ids)?;

    let series = Series {
        id: fresh_id(),
        title: title.to_owned(),
        description: description.to_owned(),
        genre_ids: request.genre_ids,
        added_at: Utc::now().timestamp(),
    };
    store.insert_series(&series)?;

    link_series_to_genres(store, &series.id, &series.genre_ids)?;
    Ok(series)
}

pub fn create_movie_genre(
    store: &dyn CatalogStore,
    request: NewMovieGenreRequest,
) -> Result<MovieGenre, CatalogError> {
    let name = require(&request.name, "name")?;

    check_movies_exist(store, &request.movie_ids)?;

    let genre = MovieGenre {
        id: fresh_id(),
        name: name.to_owned(),
        movie_ids: request.movie_ids,
        added_at: Utc::now().timestamp(),
    };
    store.insert_movie_genre(&genre)?;
    Ok(genre)
}

pub fn create_series_genre(
    store: &dyn CatalogStore,
    request: NewSeriesGenreRequest,
) -> Result<SeriesGenre, CatalogError> {
    let name = require(&request.name, "name")?;

    check_series_exist(store, &request.series_ids)?;

    let genre = SeriesGenre {
        id: fresh_id(),
        name: name.to_owned(),
        series_ids: request.series_ids,
        added_at: Utc::now().timestamp(),
    };
    store.insert_series_genre(&genre)?;
    Ok(genre)
}

pub fn create_maturity_rating(
    store: &dyn CatalogStore,
    request: NewMaturityRatingRequest,
) -> Result<MaturityRating, CatalogError> {
    let name = require(&request.name, "name")?;

    let rating = MaturityRating {
        id: fresh_id(),
        name: name.to_owned(),
        added_at: Utc::now().timestamp(),
    };
    store.insert_maturity_rating(&rating)?;
    Ok(rating)
}
