use tokio::sync::{watch, RwLock};

use crate::documents::{Game, Genre, Platform};

use super::{FilterState, FilterUpdate};

/// Shared state of the game directory: the current filters, the fetched
/// catalog data and fetch bookkeeping.
///
/// The store is passed around explicitly behind an `Arc`; all mutation goes
/// through its operations. Filter changes bump a watch channel that the
/// fetch orchestrator subscribes to.
pub struct CatalogStore {
    filters: watch::Sender<FilterState>,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    games: Vec<Game>,
    genres: Vec<Genre>,
    platforms: Vec<Platform>,
    loading: bool,
    last_issued: u64,
    last_applied: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_filters(FilterState::default())
    }

    pub fn with_filters(filters: FilterState) -> Self {
        let (filters, _) = watch::channel(filters);
        CatalogStore {
            filters,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn set_search_query(&self, search_query: impl Into<String>) {
        self.filters
            .send_modify(|filters| filters.search_query = search_query.into());
    }

    pub fn set_live_only(&self, live_only: bool) {
        self.filters
            .send_modify(|filters| filters.live_only = live_only);
    }

    pub fn toggle_live(&self) {
        self.filters
            .send_modify(|filters| filters.live_only = !filters.live_only);
    }

    /// Adds `name` to the genre selection, or removes it if already
    /// selected.
    pub fn toggle_genre(&self, name: &str) {
        self.filters
            .send_modify(|filters| toggle(&mut filters.selected_genres, name));
    }

    /// Adds `name` to the platform selection, or removes it if already
    /// selected.
    pub fn toggle_platform(&self, name: &str) {
        self.filters
            .send_modify(|filters| toggle(&mut filters.selected_platforms, name));
    }

    /// Applies a partial update onto the current filters with a shallow
    /// merge.
    pub fn update_filters(&self, update: FilterUpdate) {
        self.filters.send_modify(|filters| filters.apply(update));
    }

    /// Resets search and selections. The live toggle keeps its state.
    pub fn clear_filters(&self) {
        self.update_filters(FilterUpdate {
            search_query: Some(String::default()),
            selected_genres: Some(vec![]),
            selected_platforms: Some(vec![]),
            ..Default::default()
        });
    }

    pub fn filters(&self) -> FilterState {
        self.filters.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.filters.subscribe()
    }

    /// Registers a new fetch and returns its sequence number. The loading
    /// flag is raised until the latest issued fetch settles.
    pub async fn begin_fetch(&self) -> u64 {
        let mut inner = self.inner.write().await;
        inner.last_issued += 1;
        inner.loading = true;
        inner.last_issued
    }

    /// Applies the game list of fetch `seq`. A response that settles after a
    /// later-issued response has been applied is discarded.
    pub async fn finish_fetch(&self, seq: u64, games: Vec<Game>) {
        let mut inner = self.inner.write().await;
        if seq > inner.last_applied {
            inner.last_applied = seq;
            inner.games = games;
        }
        if seq == inner.last_issued {
            inner.loading = false;
        }
    }

    pub async fn set_genres(&self, genres: Vec<Genre>) {
        self.inner.write().await.genres = genres;
    }

    pub async fn set_platforms(&self, platforms: Vec<Platform>) {
        self.inner.write().await.platforms = platforms;
    }

    pub async fn games(&self) -> Vec<Game> {
        self.inner.read().await.games.clone()
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.inner.read().await.genres.clone()
    }

    pub async fn platforms(&self) -> Vec<Platform> {
        self.inner.read().await.platforms.clone()
    }

    pub async fn loading(&self) -> bool {
        self.inner.read().await.loading
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle(selection: &mut Vec<String>, name: &str) {
    match selection.iter().position(|entry| entry == name) {
        Some(index) => {
            selection.remove(index);
        }
        None => selection.push(name.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str) -> Game {
        Game {
            id: 1,
            name: name.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn toggle_adds_and_removes_selection() {
        let store = CatalogStore::new();

        store.toggle_genre("RPG");
        store.toggle_genre("Puzzle");
        assert_eq!(store.filters().selected_genres, vec!["RPG", "Puzzle"]);

        store.toggle_genre("RPG");
        assert_eq!(store.filters().selected_genres, vec!["Puzzle"]);
    }

    #[test]
    fn clear_filters_keeps_live_toggle() {
        let store = CatalogStore::new();
        store.set_search_query("zelda");
        store.toggle_platform("PC");
        store.set_live_only(false);

        store.clear_filters();

        let filters = store.filters();
        assert!(filters.search_query.is_empty());
        assert!(filters.selected_platforms.is_empty());
        assert_eq!(filters.live_only, false);
    }

    #[tokio::test]
    async fn stale_fetch_is_discarded() {
        let store = CatalogStore::new();

        let first = store.begin_fetch().await;
        let second = store.begin_fetch().await;

        store.finish_fetch(second, vec![game("Newer")]).await;
        store.finish_fetch(first, vec![game("Stale")]).await;

        let games = store.games().await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Newer");
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn loading_clears_only_when_latest_settles() {
        let store = CatalogStore::new();

        let first = store.begin_fetch().await;
        let second = store.begin_fetch().await;
        assert!(store.loading().await);

        store.finish_fetch(first, vec![]).await;
        assert!(store.loading().await);

        store.finish_fetch(second, vec![game("Settled")]).await;
        assert!(!store.loading().await);
    }
}
