//! Data Model
//!
//! Input and output record shapes plus the tri-state field primitive that
//! preserves the absent-vs-null distinction through the engine.

pub mod fact;
pub mod field;
pub mod record;

pub use fact::*;
pub use field::*;
pub use record::*;
