//! CatalogStore trait definition.
//!
//! This trait is the entity-store contract the resolver, the mutation layer,
//! and the server program against, keeping them independent of the SQLite
//! implementation.

use super::error::CatalogError;
use super::models::{MaturityRating, Movie, MovieGenre, Series, SeriesGenre};

pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Entity Retrieval
    // =========================================================================

    /// Get a movie by id. `Ok(None)` when no such movie exists.
    fn get_movie(&self, id: &str) -> Result<Option<Movie>, CatalogError>;

    /// Get a series by id.
    fn get_series(&self, id: &str) -> Result<Option<Series>, CatalogError>;

    /// Get a movie genre by id.
    fn get_movie_genre(&self, id: &str) -> Result<Option<MovieGenre>, CatalogError>;

    /// Get a series genre by id.
    fn get_series_genre(&self, id: &str) -> Result<Option<SeriesGenre>, CatalogError>;

    /// Get a maturity rating by id.
    fn get_maturity_rating(&self, id: &str) -> Result<Option<MaturityRating>, CatalogError>;

    // =========================================================================
    // Listing
    // =========================================================================

    fn list_movies(&self) -> Result<Vec<Movie>, CatalogError>;

    fn list_series(&self) -> Result<Vec<Series>, CatalogError>;

    fn list_movie_genres(&self) -> Result<Vec<MovieGenre>, CatalogError>;

    fn list_series_genres(&self) -> Result<Vec<SeriesGenre>, CatalogError>;

    fn list_maturity_ratings(&self) -> Result<Vec<MaturityRating>, CatalogError>;

    // =========================================================================
    // Inverse Relation Scan
    // =========================================================================

    /// All movies whose stored rating id equals `rating_id`.
    ///
    /// This is the one relation edge with no id list behind it; result order
    /// is store iteration order and not guaranteed stable across calls.
    fn find_movies_with_rating(&self, rating_id: &str) -> Result<Vec<Movie>, CatalogError>;

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Insert a complete movie record. Rejects duplicate ids.
    fn insert_movie(&self, movie: &Movie) -> Result<(), CatalogError>;

    /// Insert a complete series record. Rejects duplicate ids.
    fn insert_series(&self, series: &Series) -> Result<(), CatalogError>;

    /// Insert a complete movie genre record. Rejects duplicate ids.
    fn insert_movie_genre(&self, genre: &MovieGenre) -> Result<(), CatalogError>;

    /// Insert a complete series genre record. Rejects duplicate ids.
    fn insert_series_genre(&self, genre: &SeriesGenre) -> Result<(), CatalogError>;

    /// Insert a complete maturity rating record. Rejects duplicate ids.
    fn insert_maturity_rating(&self, rating: &MaturityRating) -> Result<(), CatalogError>;

    /// Append a movie id to a movie genre's id list.
    ///
    /// Atomic with respect to other appends on the same record. `NotFound`
    /// when the genre does not exist.
    fn append_movie_to_genre(&self, genre_id: &str, movie_id: &str) -> Result<(), CatalogError>;

    /// Append a series id to a series genre's id list.
    fn append_series_to_genre(&self, genre_id: &str, series_id: &str) -> Result<(), CatalogError>;

    // =========================================================================
    // Counts (for startup logging and server stats)
    // =========================================================================

    fn movies_count(&self) -> usize;

    fn series_count(&self) -> usize;

    fn movie_genres_count(&self) -> usize;

    fn series_genres_count(&self) -> usize;

    fn maturity_ratings_count(&self) -> usize;
}
