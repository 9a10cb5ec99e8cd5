//! The media catalog container.
//!
//! Entries live in memory for the lifetime of one script run:
//! - `add` inspects and appends a file
//! - `remove` filters entries with a small condition grammar
//! - `print_all` renders the numbered listing

pub mod catalog;
pub mod condition;

pub use catalog::Catalog;
pub use condition::{Condition, ConditionError, SizeOp};
