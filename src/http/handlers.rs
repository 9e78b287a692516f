use crate::{
    api::HasuraApi, catalog::FilterState, log_request, logging::LogHttpRequest,
    traits::CatalogSource,
};
use std::{convert::Infallible, sync::Arc};
use tracing::instrument;
use warp::http::StatusCode;

#[instrument(level = "trace")]
pub async fn welcome() -> Result<impl warp::Reply, Infallible> {
    Ok("welcome")
}

#[instrument(level = "trace", skip(hasura))]
pub async fn get_games(
    filters: FilterState,
    hasura: Arc<HasuraApi>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    match hasura.fetch_games(&filters).await {
        Ok(games) => {
            log_request!(LogHttpRequest::games(&filters, &games));
            Ok(Box::new(warp::reply::json(&games)))
        }
        Err(status) => {
            log_request!(LogHttpRequest::games_err(&filters, status));
            Ok(Box::new(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

#[instrument(level = "trace", skip(hasura))]
pub async fn get_genres(hasura: Arc<HasuraApi>) -> Result<Box<dyn warp::Reply>, Infallible> {
    match hasura.fetch_genres().await {
        Ok(genres) => {
            log_request!(LogHttpRequest::genres(&genres));
            Ok(Box::new(warp::reply::json(&genres)))
        }
        Err(status) => {
            log_request!(LogHttpRequest::genres_err(status));
            Ok(Box::new(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

#[instrument(level = "trace", skip(hasura))]
pub async fn get_platforms(hasura: Arc<HasuraApi>) -> Result<Box<dyn warp::Reply>, Infallible> {
    match hasura.fetch_platforms().await {
        Ok(platforms) => {
            log_request!(LogHttpRequest::platforms(&platforms));
            Ok(Box::new(warp::reply::json(&platforms)))
        }
        Err(status) => {
            log_request!(LogHttpRequest::platforms_err(status));
            Ok(Box::new(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}
