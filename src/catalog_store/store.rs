//! SQLite-backed catalog store implementation.
//!
//! One write connection serializes all mutations; a small round-robin pool
//! of read-only connections serves resolver traffic. Relation id lists are
//! persisted as JSON arrays in TEXT columns and decoded on read.

use super::error::CatalogError;
use super::models::{MaturityRating, Movie, MovieGenre, Series, SeriesGenre};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{Context, Result};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

const READ_POOL_SIZE: usize = 4;

/// SQLite-backed catalog store.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = CATALOG_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &CATALOG_VERSIONED_SCHEMAS[latest_version];

    // Brand new database (no tables exist): create the latest schema directly
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!("Creating catalog db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let mut current_version = (db_version - BASE_DB_VERSION as i64).max(0) as usize;

    if current_version >= latest_version {
        latest_schema.validate(conn)?;
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in CATALOG_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating catalog db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

fn parse_id_list(column: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn encode_id_list(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap()
}

impl SqliteCatalogStore {
    /// Open (or create) a catalog database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database")?;

        migrate_if_needed(&mut write_conn)?;

        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let mut read_pool = Vec::with_capacity(READ_POOL_SIZE);
        for _ in 0..READ_POOL_SIZE {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_conn.pragma_update(None, "journal_mode", "WAL")?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteCatalogStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        info!(
            "Opened catalog: {} movies, {} series, {} movie genres, {} series genres, {} maturity ratings",
            store.movies_count(),
            store.series_count(),
            store.movie_genres_count(),
            store.series_genres_count(),
            store.maturity_ratings_count(),
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn count(&self, table: &str) -> usize {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .unwrap_or(0) as usize
    }

    // =========================================================================
    // Row Parsing
    // =========================================================================

    fn parse_movie_row(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
        let genre_ids_json: String = row.get(5)?;
        Ok(Movie {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            released_year: row.get(3)?,
            maturity_rating_id: row.get(4)?,
            genre_ids: parse_id_list(5, &genre_ids_json)?,
            image: row.get(6)?,
            added_at: row.get(7)?,
        })
    }

    fn parse_series_row(row: &rusqlite::Row) -> rusqlite::Result<Series> {
        let genre_ids_json: String = row.get(3)?;
        Ok(Series {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            genre_ids: parse_id_list(3, &genre_ids_json)?,
            added_at: row.get(4)?,
        })
    }

    fn parse_movie_genre_row(row: &rusqlite::Row) -> rusqlite::Result<MovieGenre> {
        let movie_ids_json: String = row.get(2)?;
        Ok(MovieGenre {
            id: row.get(0)?,
            name: row.get(1)?,
            movie_ids: parse_id_list(2, &movie_ids_json)?,
            added_at: row.get(3)?,
        })
    }

    fn parse_series_genre_row(row: &rusqlite::Row) -> rusqlite::Result<SeriesGenre> {
        let series_ids_json: String = row.get(2)?;
        Ok(SeriesGenre {
            id: row.get(0)?,
            name: row.get(1)?,
            series_ids: parse_id_list(2, &series_ids_json)?,
            added_at: row.get(3)?,
        })
    }

    fn parse_maturity_rating_row(row: &rusqlite::Row) -> rusqlite::Result<MaturityRating> {
        Ok(MaturityRating {
            id: row.get(0)?,
            name: row.get(1)?,
            added_at: row.get(2)?,
        })
    }

    // =========================================================================
    // Write Helpers
    // =========================================================================

    /// Run `body` inside a BEGIN IMMEDIATE transaction on the write
    /// connection, committing on success and rolling back on error.
    fn in_write_transaction<T>(
        &self,
        body: impl FnOnce(&Connection) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let conn = self.write_conn.lock().unwrap();
        conn.execute("BEGIN IMMEDIATE", [])?;

        match body(&conn) {
            Ok(value) => {
                conn.execute("COMMIT", [])?;
                Ok(value)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    fn ensure_fresh_id(
        conn: &Connection,
        table: &str,
        entity: &'static str,
        id: &str,
    ) -> Result<(), CatalogError> {
        let exists: bool = conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table),
            params![id],
            |r| r.get(0),
        )?;
        if exists {
            return Err(CatalogError::DuplicateId {
                entity,
                id: id.to_owned(),
            });
        }
        Ok(())
    }

    /// Read-modify-write append of one id onto a record's JSON id list.
    /// The enclosing transaction makes the append atomic per record.
    fn append_to_id_list(
        &self,
        table: &str,
        entity: &'static str,
        list_column: &str,
        owner_id: &str,
        new_id: &str,
    ) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            let current: String = match conn.query_row(
                &format!("SELECT {} FROM {} WHERE id = ?1", list_column, table),
                params![owner_id],
                |r| r.get(0),
            ) {
                Ok(raw) => raw,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(CatalogError::NotFound {
                        entity,
                        id: owner_id.to_owned(),
                    })
                }
                Err(e) => return Err(e.into()),
            };

            let mut ids: Vec<String> = serde_json::from_str(&current).unwrap_or_default();
            ids.push(new_id.to_owned());

            conn.execute(
                &format!("UPDATE {} SET {} = ?1 WHERE id = ?2", table, list_column),
                params![encode_id_list(&ids), owner_id],
            )?;
            Ok(())
        })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn get_movie(&self, id: &str) -> Result<Option<Movie>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, title, description, released_year, maturity_rating_id, genre_ids, image, added_at
             FROM movies WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::parse_movie_row) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_series(&self, id: &str) -> Result<Option<Series>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, title, description, genre_ids, added_at FROM series WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::parse_series_row) {
            Ok(series) => Ok(Some(series)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_movie_genre(&self, id: &str) -> Result<Option<MovieGenre>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, name, movie_ids, added_at FROM movie_genres WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::parse_movie_genre_row) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_series_genre(&self, id: &str) -> Result<Option<SeriesGenre>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, name, series_ids, added_at FROM series_genres WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::parse_series_genre_row) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_maturity_rating(&self, id: &str) -> Result<Option<MaturityRating>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn
            .prepare_cached("SELECT id, name, added_at FROM maturity_ratings WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::parse_maturity_rating_row) {
            Ok(rating) => Ok(Some(rating)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_movies(&self) -> Result<Vec<Movie>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, title, description, released_year, maturity_rating_id, genre_ids, image, added_at
             FROM movies",
        )?;
        let movies = stmt
            .query_map([], Self::parse_movie_row)?
            .collect::<Result<Vec<Movie>, _>>()?;
        Ok(movies)
    }

    fn list_series(&self) -> Result<Vec<Series>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn
            .prepare_cached("SELECT id, title, description, genre_ids, added_at FROM series")?;
        let series = stmt
            .query_map([], Self::parse_series_row)?
            .collect::<Result<Vec<Series>, _>>()?;
        Ok(series)
    }

    fn list_movie_genres(&self) -> Result<Vec<MovieGenre>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt =
            conn.prepare_cached("SELECT id, name, movie_ids, added_at FROM movie_genres")?;
        let genres = stmt
            .query_map([], Self::parse_movie_genre_row)?
            .collect::<Result<Vec<MovieGenre>, _>>()?;
        Ok(genres)
    }

    fn list_series_genres(&self) -> Result<Vec<SeriesGenre>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt =
            conn.prepare_cached("SELECT id, name, series_ids, added_at FROM series_genres")?;
        let genres = stmt
            .query_map([], Self::parse_series_genre_row)?
            .collect::<Result<Vec<SeriesGenre>, _>>()?;
        Ok(genres)
    }

    fn list_maturity_ratings(&self) -> Result<Vec<MaturityRating>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached("SELECT id, name, added_at FROM maturity_ratings")?;
        let ratings = stmt
            .query_map([], Self::parse_maturity_rating_row)?
            .collect::<Result<Vec<MaturityRating>, _>>()?;
        Ok(ratings)
    }

    fn find_movies_with_rating(&self, rating_id: &str) -> Result<Vec<Movie>, CatalogError> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();

        let mut stmt = conn.prepare_cached(
            "SELECT id, title, description, released_year, maturity_rating_id, genre_ids, image, added_at
             FROM movies WHERE maturity_rating_id = ?1",
        )?;
        let movies = stmt
            .query_map(params![rating_id], Self::parse_movie_row)?
            .collect::<Result<Vec<Movie>, _>>()?;
        Ok(movies)
    }

    fn insert_movie(&self, movie: &Movie) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            Self::ensure_fresh_id(conn, "movies", "Movie", &movie.id)?;
            conn.execute(
                "INSERT INTO movies (id, title, description, released_year, maturity_rating_id, genre_ids, image, added_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    &movie.id,
                    &movie.title,
                    &movie.description,
                    movie.released_year,
                    &movie.maturity_rating_id,
                    encode_id_list(&movie.genre_ids),
                    &movie.image,
                    movie.added_at,
                ],
            )?;
            Ok(())
        })
    }

    fn insert_series(&self, series: &Series) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            Self::ensure_fresh_id(conn, "series", "Series", &series.id)?;
            conn.execute(
                "INSERT INTO series (id, title, description, genre_ids, added_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &series.id,
                    &series.title,
                    &series.description,
                    encode_id_list(&series.genre_ids),
                    series.added_at,
                ],
            )?;
            Ok(())
        })
    }

    fn insert_movie_genre(&self, genre: &MovieGenre) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            Self::ensure_fresh_id(conn, "movie_genres", "Movie genre", &genre.id)?;
            conn.execute(
                "INSERT INTO movie_genres (id, name, movie_ids, added_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    &genre.id,
                    &genre.name,
                    encode_id_list(&genre.movie_ids),
                    genre.added_at,
                ],
            )?;
            Ok(())
        })
    }

    fn insert_series_genre(&self, genre: &SeriesGenre) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            Self::ensure_fresh_id(conn, "series_genres", "Series genre", &genre.id)?;
            conn.execute(
                "INSERT INTO series_genres (id, name, series_ids, added_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    &genre.id,
                    &genre.name,
                    encode_id_list(&genre.series_ids),
                    genre.added_at,
                ],
            )?;
            Ok(())
        })
    }

    fn insert_maturity_rating(&self, rating: &MaturityRating) -> Result<(), CatalogError> {
        self.in_write_transaction(|conn| {
            Self::ensure_fresh_id(conn, "maturity_ratings", "Maturity rating", &rating.id)?;
            conn.execute(
                "INSERT INTO maturity_ratings (id, name, added_at) VALUES (?1, ?2, ?3)",
                params![&rating.id, &rating.name, rating.added_at],
            )?;
            Ok(())
        })
    }

    fn append_movie_to_genre(&self, genre_id: &str, movie_id: &str) -> Result<(), CatalogError> {
        self.append_to_id_list("movie_genres", "Movie genre", "movie_ids", genre_id, movie_id)
    }

    fn append_series_to_genre(&self, genre_id: &str, series_id: &str) -> Result<(), CatalogError> {
        self.append_to_id_list("series_genres", "Series genre", "series_ids", genre_id, series_id)
    }

    fn movies_count(&self) -> usize {
        self.count("movies")
    }

    fn series_count(&self) -> usize {
        self.count("series")
    }

    fn movie_genres_count(&self) -> usize {
        self.count("movie_genres")
    }

    fn series_genres_count(&self) -> usize {
        self.count("series_genres")
    }

    fn maturity_ratings_count(&self) -> usize {
        self.count("maturity_ratings")
    }
}
