//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (catalog ids, titles, etc.), update only this file.

// ============================================================================
// Test Catalog IDs
// ============================================================================

/// Maturity rating id for "PG-13"
pub const RATING_PG13_ID: &str = "rating-pg13";

/// Maturity rating id for "R"
pub const RATING_R_ID: &str = "rating-r";

/// Movie genre id for "Action"
pub const GENRE_ACTION_ID: &str = "genre-action";

/// Movie genre id for "Drama"
pub const GENRE_DRAMA_ID: &str = "genre-drama";

/// Movie genre id for "Comedy" (no movies filed under it)
pub const GENRE_COMEDY_ID: &str = "genre-comedy";

/// Genre id stored on MOVIE_2 that has no backing record
pub const GENRE_GHOST_ID: &str = "genre-ghost";

/// Movie id for "First Feature"
pub const MOVIE_1_ID: &str = "movie-1";

/// Movie id for "Second Feature"
pub const MOVIE_2_ID: &str = "movie-2";

/// Series genre id for "Crime"
pub const SERIES_GENRE_CRIME_ID: &str = "series-genre-crime";

/// Series id for "Test Show"
pub const SERIES_1_ID: &str = "series-1";

// ============================================================================
// Test Catalog Metadata
// ============================================================================

pub const RATING_PG13_NAME: &str = "PG-13";

pub const RATING_R_NAME: &str = "R";

pub const GENRE_ACTION_NAME: &str = "Action";

pub const GENRE_DRAMA_NAME: &str = "Drama";

pub const GENRE_COMEDY_NAME: &str = "Comedy";

pub const MOVIE_1_TITLE: &str = "First Feature";

pub const MOVIE_2_TITLE: &str = "Second Feature";

pub const SERIES_GENRE_CRIME_NAME: &str = "Crime";

pub const SERIES_1_TITLE: &str = "Test Show";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
