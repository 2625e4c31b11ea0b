//! The filter engine: state store, cascade, debounce, fetch orchestration.

pub mod generation;
pub mod filter_store;
pub mod option_cache;
pub mod cascade;
pub mod debounce;
pub mod fetch_orchestrator;
pub mod effects;
pub mod controller;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{ListingsController, ListingsView};
pub use effects::{Effect, EffectOutcome, run_effect};
