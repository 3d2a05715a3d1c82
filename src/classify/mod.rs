//! Classification Module
//!
//! The static driver table and the per-record rule pipeline built on it.

pub mod classifier;
pub mod drivers;

pub use classifier::*;
pub use drivers::*;
