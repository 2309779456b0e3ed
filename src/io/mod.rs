//! Input/output helpers.
//!
//! - form snapshot JSON / JSON-lines reading (`input`)
//! - breakdown exports (JSON, line-item CSV, JSON-lines) (`export`)

pub mod export;
pub mod input;

pub use export::*;
pub use input::*;
