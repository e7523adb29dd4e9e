mod error;
mod models;
mod mutations;
mod resolve;
mod schema;
mod store;
mod trait_def;

pub use error::CatalogError;
pub use models::*;
pub use mutations::{
    create_maturity_rating, create_movie, create_movie_genre, create_series, create_series_genre,
};
pub use resolve::{
    get_all_resolved_movies, get_all_resolved_series, get_resolved_maturity_rating,
    get_resolved_movie, get_resolved_movie_genre, get_resolved_series_genre, ResolveRelations,
};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
