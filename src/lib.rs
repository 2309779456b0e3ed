//! `quote-fees` library crate.
//!
//! Computes itemized monthly and one-time fees for a bundle of accounting
//! services from a loosely-typed quote form snapshot.
//!
//! The binary (`quote`) is a thin wrapper around this library so that:
//!
//! - pricing is testable without spawning processes
//! - other front-ends (web handlers, batch jobs) can call `engine` directly

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
pub mod services;

pub use config::PricingConfig;
pub use domain::FeeBreakdown;
pub use engine::{compute_batch, compute_quote, compute_quote_at, try_compute_quote_at};
pub use normalize::RawInput;
