#![recursion_limit = "256"]

pub mod api;
pub mod catalog;
pub mod documents;
pub mod http;
pub mod logging;
pub mod traits;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
