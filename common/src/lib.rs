//! Common library exports shared between the filter engine and the frontend.

extern crate serde;


pub mod search_const;
pub mod filter_state;
pub mod query_params;
pub mod pagination;
pub mod options;
pub mod vehicle;
