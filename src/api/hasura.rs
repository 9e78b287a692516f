use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{error, instrument};

use crate::{
    catalog::{query, FilterState},
    documents::{Game, Genre, Platform},
    traits::CatalogSource,
    Status,
};

/// Client for the Hasura GraphQL endpoint that stores the games catalog.
pub struct HasuraApi {
    endpoint: String,
    admin_secret: String,
}

impl HasuraApi {
    pub fn new(endpoint: String, admin_secret: String) -> Self {
        HasuraApi {
            endpoint,
            admin_secret,
        }
    }

    /// Sends a GraphQL request to the Hasura endpoint.
    async fn post<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<T, Status> {
        let resp = reqwest::Client::new()
            .post(&self.endpoint)
            .header("x-hasura-admin-secret", &self.admin_secret)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let text = resp.text().await?;
        let resp = match serde_json::from_str::<GraphQlResponse<T>>(&text) {
            Ok(resp) => resp,
            Err(_) => {
                let msg = format!(
                    "Received unexpected response: {text}\nendpoint: {}",
                    &self.endpoint
                );
                error!(msg);
                return Err(Status::internal(msg));
            }
        };

        if let Some(errors) = resp.errors {
            return Err(Status::internal(format!(
                "GraphQL errors: {}",
                errors.iter().map(|e| e.message.as_str()).join("; ")
            )));
        }

        match resp.data {
            Some(data) => Ok(data),
            None => Err(Status::internal("GraphQL response carried no data")),
        }
    }
}

#[async_trait]
impl CatalogSource for HasuraApi {
    #[instrument(level = "trace", skip(self))]
    async fn fetch_games(&self, filters: &FilterState) -> Result<Vec<Game>, Status> {
        let variables = serde_json::json!({ "where": query::games_filter(filters) });
        let data = self.post::<GamesData>(GAMES_QUERY, variables).await?;

        Ok(data.games.into_iter().map(Game::from).collect())
    }

    #[instrument(level = "trace", skip(self))]
    async fn fetch_genres(&self) -> Result<Vec<Genre>, Status> {
        let data = self
            .post::<GenresData>(GENRES_QUERY, serde_json::json!({}))
            .await?;

        Ok(genres_with_counts(data))
    }

    #[instrument(level = "trace", skip(self))]
    async fn fetch_platforms(&self) -> Result<Vec<Platform>, Status> {
        let data = self
            .post::<PlatformsData>(PLATFORMS_QUERY, serde_json::json!({}))
            .await?;

        Ok(platforms_with_counts(data))
    }
}

/// Joins the genre type list with occurrence counts over `game_genres`.
/// Types with no tagged games get count 0.
fn genres_with_counts(data: GenresData) -> Vec<Genre> {
    let counts = occurrences(data.game_genres.into_iter().map(|row| row.genre_name));
    data.game_genre_types
        .into_iter()
        .map(|row| Genre {
            count: counts.get(&row.genre_name).copied().unwrap_or(0),
            name: row.genre_name,
        })
        .collect()
}

fn platforms_with_counts(data: PlatformsData) -> Vec<Platform> {
    let counts = occurrences(data.game_platforms.into_iter().map(|row| row.platform_name));
    data.game_platform_types
        .into_iter()
        .map(|row| Platform {
            count: counts.get(&row.platform_name).copied().unwrap_or(0),
            name: row.platform_name,
        })
        .collect()
}

fn occurrences(names: impl Iterator<Item = String>) -> HashMap<String, u64> {
    names
        .counts()
        .into_iter()
        .map(|(name, count)| (name, count as u64))
        .collect()
}

#[derive(Serialize)]
struct GraphQlRequest {
    query: &'static str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct GamesData {
    games: Vec<GameRow>,
}

#[derive(Deserialize, Default)]
struct GameRow {
    id: u64,
    name: String,

    #[serde(default)]
    is_live: bool,

    #[serde(default)]
    directory_image_name: Option<String>,

    #[serde(default)]
    directory_gif_name: Option<String>,

    #[serde(default)]
    genres: Vec<GenreRow>,

    #[serde(default)]
    platforms: Vec<PlatformRow>,
}

#[derive(Deserialize, Default)]
struct GenreRow {
    genre_name: String,
}

#[derive(Deserialize, Default)]
struct PlatformRow {
    platform_name: String,
}

#[derive(Deserialize)]
struct GenresData {
    game_genre_types: Vec<GenreRow>,
    game_genres: Vec<GenreRow>,
}

#[derive(Deserialize)]
struct PlatformsData {
    game_platform_types: Vec<PlatformRow>,
    game_platforms: Vec<PlatformRow>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        let mut game = Game {
            id: row.id,
            name: row.name,
            is_live: row.is_live,
            directory_image_name: row.directory_image_name,
            directory_gif_name: row.directory_gif_name,
            genres: row.genres.into_iter().map(|row| row.genre_name).collect(),
            platforms: row
                .platforms
                .into_iter()
                .map(|row| row.platform_name)
                .collect(),
            image_url: None,
            gif_url: None,
        };
        game.resolve_media();
        game
    }
}

const GAMES_QUERY: &str = r#"
query GetGames($where: games_bool_exp!) {
  games(where: $where, order_by: { name: asc }) {
    id
    name
    is_live
    directory_image_name
    directory_gif_name
    genres {
      genre_name
    }
    platforms {
      platform_name
    }
  }
}"#;

const GENRES_QUERY: &str = r#"
query GetGenresWithCounts {
  game_genre_types {
    genre_name
  }
  game_genres {
    genre_name
  }
}"#;

const PLATFORMS_QUERY: &str = r#"
query GetPlatformsWithCounts {
  game_platform_types {
    platform_name
  }
  game_platforms {
    platform_name
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_row(name: &str) -> GenreRow {
        GenreRow {
            genre_name: name.to_owned(),
        }
    }

    #[test]
    fn genre_counts_cover_entire_catalog() {
        let data = GenresData {
            game_genre_types: vec![genre_row("RPG"), genre_row("Puzzle"), genre_row("Racing")],
            game_genres: vec![
                genre_row("RPG"),
                genre_row("RPG"),
                genre_row("Puzzle"),
            ],
        };

        let genres = genres_with_counts(data);

        assert_eq!(genres.len(), 3);
        assert_eq!((genres[0].name.as_str(), genres[0].count), ("RPG", 2));
        assert_eq!((genres[1].name.as_str(), genres[1].count), ("Puzzle", 1));
        assert_eq!((genres[2].name.as_str(), genres[2].count), ("Racing", 0));
    }

    #[test]
    fn game_row_resolves_media_paths() {
        let row = GameRow {
            id: 42,
            name: "Zelda Quest".to_owned(),
            is_live: true,
            directory_image_name: Some("zelda.png".to_owned()),
            genres: vec![genre_row("Action")],
            ..Default::default()
        };

        let game = Game::from(row);

        assert_eq!(game.image_url.as_deref(), Some("/images/zelda.png"));
        assert!(game.gif_url.is_none());
        assert_eq!(game.genres, vec!["Action"]);
    }
}
