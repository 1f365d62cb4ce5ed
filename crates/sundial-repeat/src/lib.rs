//! Recurrence engine: the repeat-rule mini-language and the search for a
//! task's next due date.
//!
//! The engine is pure and stateless. A [`rule::RepeatRule`] is parsed fresh
//! for every evaluation and discarded afterwards; only the raw spec string
//! is ever persisted.

pub mod error;
pub mod next_date;
pub mod rule;

pub use error::{RepeatError, RepeatResult};
pub use next_date::{next_date, next_occurrence};
pub use rule::RepeatRule;
