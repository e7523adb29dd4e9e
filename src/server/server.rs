use anyhow::Result;
use std::time::{Duration, Instant};

use crate::catalog_store::{
    create_maturity_rating, create_movie, create_movie_genre, create_series, create_series_genre,
    get_all_resolved_movies, get_all_resolved_series, get_resolved_maturity_rating,
    get_resolved_movie, get_resolved_movie_genre, get_resolved_series_genre, CatalogError,
    NewMaturityRatingRequest, NewMovieGenreRequest, NewMovieRequest, NewSeriesGenreRequest,
    NewSeriesRequest,
};
use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub movies: usize,
    pub series: usize,
    pub movie_genres: usize,
    pub series_genres: usize,
    pub maturity_ratings: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Maps a catalog error onto an HTTP status, with the error message passed
/// through verbatim so the admin UI can show it as-is.
fn error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::MissingField { .. }
        | CatalogError::MalformedField { .. }
        | CatalogError::Reference { .. }
        | CatalogError::DuplicateId { .. } => StatusCode::BAD_REQUEST,
        CatalogError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, err.to_string()).into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        movies: state.catalog_store.movies_count(),
        series: state.catalog_store.series_count(),
        movie_genres: state.catalog_store.movie_genres_count(),
        series_genres: state.catalog_store.series_genres_count(),
        maturity_ratings: state.catalog_store.maturity_ratings_count(),
    };
    Json(stats)
}

// =============================================================================
// Query Handlers
// =============================================================================

async fn get_movies(State(catalog): State<GuardedCatalogStore>) -> Response {
    match get_all_resolved_movies(catalog.as_ref()) {
        Ok(movies) => Json(movies).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_movie(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match get_resolved_movie(catalog.as_ref(), &id) {
        Ok(Some(movie)) => Json(movie).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_series_list(State(catalog): State<GuardedCatalogStore>) -> Response {
    match get_all_resolved_series(catalog.as_ref()) {
        Ok(series) => Json(series).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_movie_genres(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.list_movie_genres() {
        Ok(genres) => Json(genres).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_movie_genre(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match get_resolved_movie_genre(catalog.as_ref(), &id) {
        Ok(Some(genre)) => Json(genre).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_series_genres(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.list_series_genres() {
        Ok(genres) => Json(genres).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_series_genre(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match get_resolved_series_genre(catalog.as_ref(), &id) {
        Ok(Some(genre)) => Json(genre).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_maturity_ratings(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.list_maturity_ratings() {
        Ok(ratings) => Json(ratings).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_maturity_rating(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match get_resolved_maturity_rating(catalog.as_ref(), &id) {
        Ok(Some(rating)) => Json(rating).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

// =============================================================================
// Mutation Handlers
// =============================================================================

async fn post_movie(
    State(catalog): State<GuardedCatalogStore>,
    Json(request): Json<NewMovieRequest>,
) -> Response {
    match create_movie(catalog.as_ref(), request) {
        Ok(movie) => (StatusCode::CREATED, Json(movie)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_series(
    State(catalog): State<GuardedCatalogStore>,
    Json(request): Json<NewSeriesRequest>,
) -> Response {
    match create_series(catalog.as_ref(), request) {
        Ok(series) => (StatusCode::CREATED, Json(series)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_movie_genre(
    State(catalog): State<GuardedCatalogStore>,
    Json(request): Json<NewMovieGenreRequest>,
) -> Response {
    match create_movie_genre(catalog.as_ref(), request) {
        Ok(genre) => (StatusCode::CREATED, Json(genre)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_series_genre(
    State(catalog): State<GuardedCatalogStore>,
    Json(request): Json<NewSeriesGenreRequest>,
) -> Response {
    match create_series_genre(catalog.as_ref(), request) {
        Ok(genre) => (StatusCode::CREATED, Json(genre)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_maturity_rating(
    State(catalog): State<GuardedCatalogStore>,
    Json(request): Json<NewMaturityRatingRequest>,
) -> Response {
    match create_maturity_rating(catalog.as_ref(), request) {
        Ok(rating) => (StatusCode::CREATED, Json(rating)).into_response(),
        Err(err) => error_response(err),
    }
}

// =============================================================================
// App Assembly
// =============================================================================

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let frontend_dir_path = config.frontend_dir_path.clone();

    let state = ServerState {
        config,
        start_time: Instant::now(),
        catalog_store,
    };

    let catalog_routes: Router = Router::new()
        .route("/movies", get(get_movies))
        .route("/movies", post(post_movie))
        .route("/movie/{id}", get(get_movie))
        .route("/series", get(get_series_list))
        .route("/series", post(post_series))
        .route("/movie-genres", get(get_movie_genres))
        .route("/movie-genres", post(post_movie_genre))
        .route("/movie-genre/{id}", get(get_movie_genre))
        .route("/series-genres", get(get_series_genres))
        .route("/series-genres", post(post_series_genre))
        .route("/series-genre/{id}", get(get_series_genre))
        .route("/maturity-ratings", get(get_maturity_ratings))
        .route("/maturity-ratings", post(post_maturity_rating))
        .route("/maturity-rating/{id}", get(get_maturity_rating))
        .with_state(state.clone());

    let mut app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/v1", catalog_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    if let Some(frontend_dir_path) = frontend_dir_path {
        app = app.fallback_service(ServeDir::new(frontend_dir_path));
    }

    app
}

pub async fn run_server(
    catalog_store: GuardedCatalogStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, catalog_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
