use async_trait::async_trait;

use crate::{
    catalog::FilterState,
    documents::{Game, Genre, Platform},
    Status,
};

/// Backend that supplies the directory catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns games matching `filters`, sorted by name ascending.
    async fn fetch_games(&self, filters: &FilterState) -> Result<Vec<Game>, Status>;

    /// Returns all genre types with occurrence counts over the entire
    /// catalog.
    async fn fetch_genres(&self) -> Result<Vec<Genre>, Status>;

    /// Returns all platform types with occurrence counts over the entire
    /// catalog.
    async fn fetch_platforms(&self) -> Result<Vec<Platform>, Status>;
}
