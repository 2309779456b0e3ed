//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the canonical quote input (`PricingInput`) and its enums
//! - the itemized quote output (`FeeBreakdown`, `ServiceFee`)

pub mod breakdown;
pub mod types;

pub use breakdown::*;
pub use types::*;
