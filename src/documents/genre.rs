use serde::{Deserialize, Serialize};

/// A genre type together with the number of games tagged with it across the
/// entire catalog, regardless of active filters.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct Genre {
    pub name: String,

    #[serde(default)]
    pub count: u64,
}
