//! Client for the listings backend and the filter engine that drives it.

pub mod config;
pub mod error;
pub mod api;
pub mod state;
pub(crate) mod http_utils;

pub use config::{ClientConfig, DebounceDelays, PrunePolicy, RetryPolicy};
pub use error::ApiError;
