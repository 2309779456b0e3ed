//! Quote reporting: text summaries and "show your work" breakdowns.

pub mod format;

pub use format::*;
