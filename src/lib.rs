#![forbid(unsafe_code)]

//! paperstat — host telemetry on a 2.13" e-paper panel.
//!
//! One pass per invocation: collect a fixed set of host telemetry values
//! (identity, network, thermal, memory, disk, uptime, wireless, clock),
//! lay them out as labeled text fields on a 250×122 monochrome canvas, and
//! hand the frame to one of two interchangeable backends — the physical
//! panel on the configured host, a PNG preview everywhere else.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use paperstat::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use paperstat::core::config::Config;
//! use paperstat::telemetry::collector::Collector;
//! ```

pub mod prelude;

pub mod core;
pub mod display;
pub mod render;
pub mod runner;
pub mod telemetry;
