use clap::Parser;
use game_directory::{api::HasuraApi, http, Status, Tracing};
use std::{env, path::PathBuf, sync::Arc};
use tracing::info;
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// Port number to use for listening to HTTP requests.
    #[clap(short, long, default_value = "3000")]
    port: u16,

    /// URL of the Hasura GraphQL endpoint that stores the games catalog.
    #[clap(long, default_value = "http://localhost:8080/v1/graphql")]
    graphql_endpoint: String,

    /// Directory with the game directory images.
    #[clap(long, default_value = "images")]
    images_dir: PathBuf,

    /// Directory with the game directory gifs.
    #[clap(long, default_value = "gifs")]
    gifs_dir: PathBuf,

    /// GCP project id used for prod tracing.
    #[clap(long, default_value = "game-directory")]
    project_id: String,

    #[clap(long)]
    prod_tracing: bool,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    match opts.prod_tracing {
        false => Tracing::setup("game-directory")?,
        true => Tracing::setup_prod(&opts.project_id)?,
    }

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let admin_secret = env::var("HASURA_GRAPHQL_ADMIN_SECRET").unwrap_or_default();
    let hasura = HasuraApi::new(opts.graphql_endpoint, admin_secret);

    info!("game directory server started");

    warp::serve(
        http::routes::routes(Arc::new(hasura), opts.images_dir, opts.gifs_dir).with(
            warp::cors()
                .allow_methods(vec!["GET"])
                .allow_headers(vec!["Content-Type"])
                .allow_any_origin(),
        ),
    )
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
