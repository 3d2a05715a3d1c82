//! Capacity Module
//!
//! Raw capacity conversion through the injected byte formatter.

pub mod format;
pub mod processor;

pub use format::*;
pub use processor::*;
