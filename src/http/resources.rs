use crate::api::HasuraApi;
use std::{convert::Infallible, sync::Arc};
use warp::{self, Filter};

pub fn with_hasura(
    hasura: Arc<HasuraApi>,
) -> impl Filter<Extract = (Arc<HasuraApi>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&hasura))
}
