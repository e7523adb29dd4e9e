//! Relation resolution.
//!
//! Turns records holding denormalized id references into the materialized
//! `Resolved*` shapes served to the admin UI. Two strategies:
//!
//! - forward: follow the id list stored on the source record, in stored
//!   order, skipping ids that no longer resolve (a dangling reference is
//!   tolerated on the read path, never fatal);
//! - inverse: scan the referencing kind for records pointing at the source
//!   (maturity rating -> movies, the one edge with no stored list).
//!
//! Resolution is a pure read. Sibling records are resolved independently,
//! one store access per relation edge per record; there is no cross-record
//! batching.

use super::error::CatalogError;
use super::models::{
    MaturityRating, Movie, MovieGenre, ResolvedMaturityRating, ResolvedMovie, ResolvedMovieGenre,
    ResolvedSeries, ResolvedSeriesGenre, Series, SeriesGenre,
};
use super::trait_def::CatalogStore;

/// Forward resolution of an id list: fetch each target in stored order,
/// dropping ids that resolve to nothing.
fn resolve_id_list<T>(
    ids: &[String],
    mut fetch: impl FnMut(&str) -> Result<Option<T>, CatalogError>,
) -> Result<Vec<T>, CatalogError> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(record) = fetch(id)? {
            out.push(record);
        }
    }
    Ok(out)
}

/// Capability implemented by every entity kind that can expand its relation
/// references into full records. The result shapes are fixed per kind; a
/// request for a field outside them does not exist at this level.
pub trait ResolveRelations {
    type Resolved;

    fn resolve(self, store: &dyn CatalogStore) -> Result<Self::Resolved, CatalogError>;
}

impl ResolveRelations for Movie {
    type Resolved = ResolvedMovie;

    fn resolve(self, store: &dyn CatalogStore) -> Result<ResolvedMovie, CatalogError> {
        let maturity_rating = store.get_maturity_rating(&self.maturity_rating_id)?;
        let genres = resolve_id_list(&self.genre_ids, |id| store.get_movie_genre(id))?;
        Ok(ResolvedMovie {
            movie: self,
            maturity_rating,
            genres,
        })
    }
}

impl ResolveRelations for Series {
    type Resolved = ResolvedSeries;

    fn resolve(self, store: &dyn CatalogStore) -> Result<ResolvedSeries, CatalogError> {
        let genres = resolve_id_list(&self.genre_ids, |id| store.get_series_genre(id))?;
        Ok(ResolvedSeries {
            series: self,
            genres,
        })
    }
}

impl ResolveRelations for MovieGenre {
    type Resolved = ResolvedMovieGenre;

    fn resolve(self, store: &dyn CatalogStore) -> Result<ResolvedMovieGenre, CatalogError> {
        let movies = resolve_id_list(&self.movie_ids, |id| store.get_movie(id))?;
        Ok(ResolvedMovieGenre {
            genre: self,
            movies,
        })
    }
}

impl ResolveRelations for SeriesGenre {
    type Resolved = ResolvedSeriesGenre;

    fn resolve(self, store: &dyn CatalogStore) -> Result<ResolvedSeriesGenre, CatalogError> {
        let series = resolve_id_list(&self.series_ids, |id| store.get_series(id))?;
        Ok(ResolvedSeriesGenre {
            genre: self,
            series,
        })
    }
}

impl ResolveRelations for MaturityRating {
    type Resolved = ResolvedMaturityRating;

    fn resolve(self, store: &dyn CatalogStore) -> Result<ResolvedMaturityRating, CatalogError> {
        let movies = store.find_movies_with_rating(&self.id)?;
        Ok(ResolvedMaturityRating {
            rating: self,
            movies,
        })
    }
}

// =============================================================================
// Query Operations
// =============================================================================

/// Every movie, with rating and genres materialized.
pub fn get_all_resolved_movies(
    store: &dyn CatalogStore,
) -> Result<Vec<ResolvedMovie>, CatalogError> {
    let mut out = Vec::new();
    for movie in store.list_movies()? {
        out.push(movie.resolve(store)?);
    }
    Ok(out)
}

/// A single movie, or `Ok(None)` when the id matches nothing.
pub fn get_resolved_movie(
    store: &dyn CatalogStore,
    id: &str,
) -> Result<Option<ResolvedMovie>, CatalogError> {
    match store.get_movie(id)? {
        Some(movie) => Ok(Some(movie.resolve(store)?)),
        None => Ok(None),
    }
}

/// Every series, with genres materialized.
pub fn get_all_resolved_series(
    store: &dyn CatalogStore,
) -> Result<Vec<ResolvedSeries>, CatalogError> {
    let mut out = Vec::new();
    for series in store.list_series()? {
        out.push(series.resolve(store)?);
    }
    Ok(out)
}

pub fn get_resolved_movie_genre(
    store: &dyn CatalogStore,
    id: &str,
) -> Result<Option<ResolvedMovieGenre>, CatalogError> {
    match store.get_movie_genre(id)? {
        Some(genre) => Ok(Some(genre.resolve(store)?)),
        None => Ok(None),
    }
}

pub fn get_resolved_series_genre(
    store: &dyn CatalogStore,
    id: &str,
) -> Result<Option<ResolvedSeriesGenre>, CatalogError> {
    match store.get_series_genre(id)? {
        Some(genre) => Ok(Some(genre.resolve(store)?)),
        None => Ok(None),
    }
}

pub fn get_resolved_maturity_rating(
    store: &dyn CatalogStore,
    id: &str,
) -> Result<Option<ResolvedMaturityRating>, CatalogError> {
    match store.get_maturity_rating(id)? {
        Some(rating) => Ok(Some(rating.resolve(store)?)),
        None => Ok(None),
    }
}
