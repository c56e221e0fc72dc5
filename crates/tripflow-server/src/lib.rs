//! TripFlow relay server
//!
//! The binary is a thin wrapper around this library so integration tests
//! can drive the router in-process.

pub mod api;
pub mod config;
pub mod prompt;
pub mod static_assets;
