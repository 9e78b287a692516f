mod fetcher;
mod filter_state;
pub mod query;
mod store;

pub use fetcher::{FetchOrchestrator, DEBOUNCE_DELAY};
pub use filter_state::{FilterState, FilterUpdate};
pub use store::CatalogStore;
