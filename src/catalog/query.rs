use serde_json::{json, Value};

use super::FilterState;

/// Builds the Hasura `games_bool_exp` for `filters`.
///
/// The expression is a `_and` conjunction of the active filter dimensions.
/// Empty search and selections contribute no condition; the live toggle
/// always contributes exactly one equality condition.
pub fn games_filter(filters: &FilterState) -> Value {
    let mut conditions = vec![];

    if !filters.search_query.is_empty() {
        conditions.push(json!({
            "name": { "_ilike": format!("%{}%", filters.search_query) }
        }));
    }

    conditions.push(json!({ "is_live": { "_eq": filters.live_only } }));

    if !filters.selected_genres.is_empty() {
        conditions.push(json!({
            "genres": { "genre_name": { "_in": filters.selected_genres } }
        }));
    }

    if !filters.selected_platforms.is_empty() {
        conditions.push(json!({
            "platforms": { "platform_name": { "_in": filters.selected_platforms } }
        }));
    }

    json!({ "_and": conditions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Game;

    #[test]
    fn default_filters_produce_single_condition() {
        let expr = games_filter(&FilterState::default());

        let conditions = expr["_and"].as_array().unwrap();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0], json!({ "is_live": { "_eq": true } }));
    }

    #[test]
    fn live_toggle_is_always_a_single_equality() {
        for live_only in [true, false] {
            let filters = FilterState {
                search_query: "zelda".to_owned(),
                selected_genres: vec!["RPG".to_owned()],
                selected_platforms: vec!["PC".to_owned()],
                live_only,
            };

            let expr = games_filter(&filters);
            let live_conditions = expr["_and"]
                .as_array()
                .unwrap()
                .iter()
                .filter(|condition| condition.get("is_live").is_some())
                .collect::<Vec<_>>();

            assert_eq!(live_conditions.len(), 1);
            assert_eq!(live_conditions[0]["is_live"]["_eq"], json!(live_only));
        }
    }

    #[test]
    fn genre_selection_adds_no_platform_condition() {
        let filters = FilterState {
            selected_genres: vec!["RPG".to_owned(), "Puzzle".to_owned()],
            ..Default::default()
        };

        let expr = games_filter(&filters);
        let conditions = expr["_and"].as_array().unwrap();

        let genres = conditions
            .iter()
            .find(|condition| condition.get("genres").is_some())
            .unwrap();
        assert_eq!(
            genres["genres"]["genre_name"]["_in"],
            json!(["RPG", "Puzzle"])
        );
        assert!(conditions
            .iter()
            .all(|condition| condition.get("platforms").is_none()));
    }

    #[test]
    fn search_uses_substring_pattern() {
        let filters = FilterState {
            search_query: "Zelda".to_owned(),
            ..Default::default()
        };

        let expr = games_filter(&filters);
        assert_eq!(expr["_and"][0]["name"]["_ilike"], json!("%Zelda%"));
    }

    #[test]
    fn filters_match_live_action_game_only() {
        let catalog = vec![
            game(7, "Zelda Quest", true, vec!["Action"]),
            game(13, "Zelda Quest 2", false, vec!["Action"]),
        ];
        let filters = FilterState {
            search_query: "zelda".to_owned(),
            selected_genres: vec!["Action".to_owned()],
            ..Default::default()
        };

        let expr = games_filter(&filters);
        let matched = catalog
            .iter()
            .filter(|game| matches(game, &expr))
            .collect::<Vec<_>>();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Zelda Quest");
    }

    fn game(id: u64, name: &str, is_live: bool, genres: Vec<&str>) -> Game {
        Game {
            id,
            name: name.to_owned(),
            is_live,
            genres: genres.into_iter().map(str::to_owned).collect(),
            ..Default::default()
        }
    }

    /// Interprets a `games_bool_exp` against a game the way the backend
    /// would.
    fn matches(game: &Game, expr: &Value) -> bool {
        expr["_and"].as_array().unwrap().iter().all(|condition| {
            if let Some(name) = condition.get("name") {
                let pattern = name["_ilike"].as_str().unwrap();
                let needle = pattern.trim_matches('%').to_lowercase();
                return game.name.to_lowercase().contains(&needle);
            }
            if let Some(is_live) = condition.get("is_live") {
                return game.is_live == is_live["_eq"].as_bool().unwrap();
            }
            if let Some(genres) = condition.get("genres") {
                return in_selection(&game.genres, &genres["genre_name"]["_in"]);
            }
            if let Some(platforms) = condition.get("platforms") {
                return in_selection(&game.platforms, &platforms["platform_name"]["_in"]);
            }
            false
        })
    }

    fn in_selection(tags: &[String], selection: &Value) -> bool {
        selection
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .any(|name| tags.iter().any(|tag| tag == name))
    }
}
