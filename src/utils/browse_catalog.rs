use clap::Parser;
use game_directory::{
    api::HasuraApi,
    catalog::{CatalogStore, FetchOrchestrator, FilterState, DEBOUNCE_DELAY},
    Tracing,
};
use itertools::Itertools;
use std::{env, sync::Arc, time::Duration};

/// Game directory browsing utility.
#[derive(Parser)]
struct Opts {
    /// Game name substring to search for.
    #[clap(short, long)]
    search: Option<String>,

    /// Genre name to filter by. Can be repeated.
    #[clap(long)]
    genre: Vec<String>,

    /// Platform name to filter by. Can be repeated.
    #[clap(long)]
    platform: Vec<String>,

    /// Browse non-live games instead of live ones.
    #[clap(long)]
    non_live: bool,

    /// URL of the Hasura GraphQL endpoint that stores the games catalog.
    #[clap(long, default_value = "http://localhost:8080/v1/graphql")]
    graphql_endpoint: String,
}

/// Drives the catalog engine once with the filters given on the command line
/// and prints the settled game list.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/browse_catalog")?;

    let opts: Opts = Opts::parse();

    let filters = FilterState {
        search_query: opts.search.unwrap_or_default(),
        selected_genres: opts.genre,
        selected_platforms: opts.platform,
        live_only: !opts.non_live,
    };
    println!("browsing /games?{}", filters.to_query_params());

    let store = Arc::new(CatalogStore::with_filters(filters));
    let source = Arc::new(HasuraApi::new(
        opts.graphql_endpoint,
        env::var("HASURA_GRAPHQL_ADMIN_SECRET").unwrap_or_default(),
    ));
    let task = FetchOrchestrator::new(Arc::clone(&store), source).spawn();

    // One debounce window passes before the fetch is issued.
    tokio::time::sleep(DEBOUNCE_DELAY * 2).await;
    while store.loading().await {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    task.abort();

    let games = store.games().await;
    println!(
        "Found {} games.\n{}",
        games.len(),
        games.iter().map(|game| &game.name).join("\n")
    );

    let genres = store.genres().await;
    println!(
        "Genres: {}",
        genres
            .iter()
            .map(|genre| format!("{} ({})", genre.name, genre.count))
            .join(", ")
    );

    let platforms = store.platforms().await;
    println!(
        "Platforms: {}",
        platforms
            .iter()
            .map(|platform| format!("{} ({})", platform.name, platform.count))
            .join(", ")
    );

    Ok(())
}
