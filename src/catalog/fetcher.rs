use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use crate::traits::CatalogSource;

use super::CatalogStore;

/// Delay that collapses rapid successive filter changes into a single fetch.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Drives fetching of the game list as filters change.
///
/// Filter changes restart a debounce window; only the last change within the
/// window triggers a fetch. Every fetch carries a sequence number so that a
/// stale response cannot overwrite a newer one, whatever order they settle
/// in. A failed fetch logs and stores an empty game list.
pub struct FetchOrchestrator<S: CatalogSource + 'static> {
    store: Arc<CatalogStore>,
    source: Arc<S>,
}

impl<S: CatalogSource + 'static> FetchOrchestrator<S> {
    pub fn new(store: Arc<CatalogStore>, source: Arc<S>) -> Self {
        FetchOrchestrator { store, source }
    }

    /// Spawns the orchestrator loop. Genre and platform lists are fetched
    /// once at startup; the initial game list is fetched after one debounce
    /// window, as if the filters had just changed.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        self.load_filter_lists().await;

        let mut filters = self.store.subscribe();
        filters.mark_changed();
        while filters.changed().await.is_ok() {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(DEBOUNCE_DELAY) => break,
                    changed = filters.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }

            let snapshot = filters.borrow().clone();
            let seq = self.store.begin_fetch().await;
            let store = Arc::clone(&self.store);
            let source = Arc::clone(&self.source);
            tokio::spawn(async move {
                let games = match source.fetch_games(&snapshot).await {
                    Ok(games) => games,
                    Err(status) => {
                        warn!("Failed to fetch games: {status}");
                        vec![]
                    }
                };
                store.finish_fetch(seq, games).await;
            });
        }
    }

    #[instrument(level = "trace", skip(self))]
    async fn load_filter_lists(&self) {
        let (genres, platforms) = tokio::join!(
            self.source.fetch_genres(),
            self.source.fetch_platforms()
        );
        match genres {
            Ok(genres) => self.store.set_genres(genres).await,
            Err(status) => warn!("Failed to fetch genres: {status}"),
        }
        match platforms {
            Ok(platforms) => self.store.set_platforms(platforms).await,
            Err(status) => warn!("Failed to fetch platforms: {status}"),
        }
    }
}
