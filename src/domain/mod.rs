//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types matching the backend's JSON
//! - `client.rs`: Sub-client with HTTP methods
//! - `validate.rs`: Local checks run before any write (where the slice has writes)
//! - `state.rs`: Client-held state containers (where the slice needs one)

pub mod audit;
pub mod command;
pub mod gate;
pub mod position;
pub mod settings;
pub mod status;
pub mod strategy_params;
pub mod trade;
