use serde::{Deserialize, Serialize};
use tracing::warn;
use valuable::Valuable;

use crate::{
    catalog::FilterState,
    documents::{Game, Genre, Platform},
    Status,
};

#[derive(Serialize, Deserialize, Valuable, Clone, Default, Debug)]
pub enum LogHttpRequest {
    #[default]
    Invalid,

    Games(GamesRequest, GamesResponse, Status),
    Genres(ListResponse, Status),
    Platforms(ListResponse, Status),
}

impl LogHttpRequest {
    pub fn games(filters: &FilterState, games: &[Game]) -> Self {
        LogHttpRequest::Games(
            GamesRequest::new(filters),
            GamesResponse {
                games: games
                    .iter()
                    .map(|game| Document {
                        id: game.id,
                        name: game.name.clone(),
                    })
                    .collect(),
            },
            Status::Ok,
        )
    }

    pub fn games_err(filters: &FilterState, status: Status) -> Self {
        LogHttpRequest::Games(GamesRequest::new(filters), GamesResponse::default(), status)
    }

    pub fn genres(genres: &[Genre]) -> Self {
        LogHttpRequest::Genres(
            ListResponse {
                names: genres.iter().map(|genre| genre.name.clone()).collect(),
            },
            Status::Ok,
        )
    }

    pub fn genres_err(status: Status) -> Self {
        LogHttpRequest::Genres(ListResponse::default(), status)
    }

    pub fn platforms(platforms: &[Platform]) -> Self {
        LogHttpRequest::Platforms(
            ListResponse {
                names: platforms
                    .iter()
                    .map(|platform| platform.name.clone())
                    .collect(),
            },
            Status::Ok,
        )
    }

    pub fn platforms_err(status: Status) -> Self {
        LogHttpRequest::Platforms(ListResponse::default(), status)
    }

    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                String::default()
            }
        }
    }
}

#[macro_export]
macro_rules! log_request {
    ($request:expr) => {
        ::tracing::debug!(request = $request.encode());
    };
}

#[derive(Serialize, Deserialize, Valuable, Clone, Default, Debug)]
pub struct GamesRequest {
    search: String,
    genres: Vec<String>,
    platforms: Vec<String>,
    live: bool,
}

impl GamesRequest {
    fn new(filters: &FilterState) -> Self {
        GamesRequest {
            search: filters.search_query.clone(),
            genres: filters.selected_genres.clone(),
            platforms: filters.selected_platforms.clone(),
            live: filters.live_only,
        }
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Default, Debug)]
pub struct GamesResponse {
    games: Vec<Document>,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Default, Debug)]
pub struct ListResponse {
    names: Vec<String>,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Default, Debug)]
struct Document {
    id: u64,
    name: String,
}
