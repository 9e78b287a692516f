use serde::{Deserialize, Serialize};

/// Document type that represents a game entry in the directory catalog.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct Game {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub is_live: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_image_name: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_gif_name: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
}

impl Game {
    /// Resolves the directory media filenames to the static paths they are
    /// served from. A missing filename yields no media.
    pub fn resolve_media(&mut self) {
        self.image_url = self
            .directory_image_name
            .as_ref()
            .map(|name| format!("/images/{name}"));
        self.gif_url = self
            .directory_gif_name
            .as_ref()
            .map(|name| format!("/gifs/{name}"));
    }
}
