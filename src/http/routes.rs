use crate::{api::HasuraApi, catalog::FilterState};
use std::{path::PathBuf, sync::Arc};
use tracing::warn;
use warp::{self, Filter};

use super::{handlers, resources::*};

/// Returns a Filter with all available routes.
pub fn routes(
    hasura: Arc<HasuraApi>,
    images_dir: PathBuf,
    gifs_dir: PathBuf,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    home()
        .or(get_games(Arc::clone(&hasura)))
        .or(get_genres(Arc::clone(&hasura)))
        .or(get_platforms(hasura))
        .or(get_images(images_dir))
        .or(get_gifs(gifs_dir))
        .or_else(|e| async {
            warn! {"Rejected route: {:?}", e};
            Err(e)
        })
}

/// GET /
fn home() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!().and(warp::get()).and_then(handlers::welcome)
}

/// GET /games?search=zelda&genres=Action,RPG&platforms=PC&live=true
fn get_games(
    hasura: Arc<HasuraApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::get())
        .and(filters_query())
        .and(with_hasura(hasura))
        .and_then(handlers::get_games)
}

/// GET /genres
fn get_genres(
    hasura: Arc<HasuraApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("genres")
        .and(warp::get())
        .and(with_hasura(hasura))
        .and_then(handlers::get_genres)
}

/// GET /platforms
fn get_platforms(
    hasura: Arc<HasuraApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("platforms")
        .and(warp::get())
        .and(with_hasura(hasura))
        .and_then(handlers::get_platforms)
}

/// GET /images/{file}
fn get_images(
    dir: PathBuf,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("images").and(warp::get()).and(warp::fs::dir(dir))
}

/// GET /gifs/{file}
fn get_gifs(
    dir: PathBuf,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("gifs").and(warp::get()).and(warp::fs::dir(dir))
}

/// Decodes `FilterState` from the request's query string, so directory URLs
/// are shareable. A request without a query string gets the defaults.
fn filters_query() -> impl Filter<Extract = (FilterState,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::default))
        .unify()
        .map(|query: String| FilterState::from_query_params(&query))
}
