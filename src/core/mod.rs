//! Core types: errors, configuration, backend mode.

pub mod config;
pub mod errors;
