use itertools::Itertools;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Filter dimensions applied to the game directory.
///
/// Defaults to showing live games with no search or selections.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    #[serde(default)]
    pub search_query: String,

    #[serde(default)]
    pub selected_genres: Vec<String>,

    #[serde(default)]
    pub selected_platforms: Vec<String>,

    #[serde(default = "default_live_only")]
    pub live_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            search_query: String::default(),
            selected_genres: vec![],
            selected_platforms: vec![],
            live_only: true,
        }
    }
}

fn default_live_only() -> bool {
    true
}

impl FilterState {
    /// Applies a partial update with a shallow merge. Fields absent from
    /// `update` keep their current value.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(search_query) = update.search_query {
            self.search_query = search_query;
        }
        if let Some(selected_genres) = update.selected_genres {
            self.selected_genres = selected_genres;
        }
        if let Some(selected_platforms) = update.selected_platforms {
            self.selected_platforms = selected_platforms;
        }
        if let Some(live_only) = update.live_only {
            self.live_only = live_only;
        }
    }

    /// Encodes the filter state as URL query parameters. Empty search and
    /// selections are omitted; the live toggle is always present.
    pub fn to_query_params(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::default());
        if !self.search_query.is_empty() {
            params.append_pair("search", &self.search_query);
        }
        if !self.selected_genres.is_empty() {
            params.append_pair("genres", &self.selected_genres.iter().join(","));
        }
        if !self.selected_platforms.is_empty() {
            params.append_pair("platforms", &self.selected_platforms.iter().join(","));
        }
        params.append_pair("live", if self.live_only { "true" } else { "false" });
        params.finish()
    }

    /// Decodes filter state from URL query parameters. Absent parameters
    /// keep their default value.
    pub fn from_query_params(query: &str) -> Self {
        let mut filters = FilterState::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => filters.search_query = value.into_owned(),
                "genres" => filters.selected_genres = split_selection(&value),
                "platforms" => filters.selected_platforms = split_selection(&value),
                "live" => filters.live_only = value == "true",
                _ => {}
            }
        }
        filters
    }
}

fn split_selection(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Partial filter update applied onto a `FilterState` with a shallow merge.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct FilterUpdate {
    #[serde(default)]
    pub search_query: Option<String>,

    #[serde(default)]
    pub selected_genres: Option<Vec<String>>,

    #[serde(default)]
    pub selected_platforms: Option<Vec<String>>,

    #[serde(default)]
    pub live_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_live_games_only() {
        let filters = FilterState::default();

        assert!(filters.search_query.is_empty());
        assert!(filters.selected_genres.is_empty());
        assert!(filters.selected_platforms.is_empty());
        assert_eq!(filters.live_only, true);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut filters = FilterState {
            search_query: "zelda".to_owned(),
            selected_genres: vec!["Action".to_owned()],
            ..Default::default()
        };

        filters.apply(FilterUpdate {
            selected_genres: Some(vec![]),
            live_only: Some(false),
            ..Default::default()
        });

        assert_eq!(filters.search_query, "zelda");
        assert!(filters.selected_genres.is_empty());
        assert_eq!(filters.live_only, false);
    }

    #[test]
    fn query_params_round_trip() {
        let cases = vec![
            FilterState::default(),
            FilterState {
                search_query: "zelda".to_owned(),
                ..Default::default()
            },
            FilterState {
                selected_genres: vec!["RPG".to_owned(), "Puzzle".to_owned()],
                ..Default::default()
            },
            FilterState {
                selected_platforms: vec!["PC".to_owned()],
                live_only: false,
                ..Default::default()
            },
            FilterState {
                search_query: "mario kart".to_owned(),
                selected_genres: vec!["Racing".to_owned()],
                selected_platforms: vec!["Switch".to_owned(), "Wii U".to_owned()],
                live_only: false,
            },
        ];

        for filters in cases {
            let decoded = FilterState::from_query_params(&filters.to_query_params());
            assert_eq!(decoded, filters);
        }
    }

    #[test]
    fn absent_params_keep_defaults() {
        assert_eq!(FilterState::from_query_params(""), FilterState::default());
    }

    #[test]
    fn special_characters_survive_encoding() {
        let filters = FilterState {
            search_query: "tom & jerry".to_owned(),
            selected_genres: vec!["Beat 'em up".to_owned()],
            ..Default::default()
        };

        let params = filters.to_query_params();
        assert_eq!(FilterState::from_query_params(&params), filters);
    }

    #[test]
    fn unknown_params_are_ignored() {
        let filters = FilterState::from_query_params("search=zelda&page=3&live=false");

        assert_eq!(filters.search_query, "zelda");
        assert_eq!(filters.live_only, false);
    }
}
