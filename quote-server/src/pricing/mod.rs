//! Row Pricing Engine Module
//!
//! This module prices quote lines and aggregates them into order totals.
//! All functions are pure over their inputs; [`QuoteSession`] is the only
//! stateful piece and is owned by the caller.

mod equivalence;
mod error;
mod order_calculator;
mod row_calculator;
pub mod session;

pub use equivalence::*;
pub use error::SessionError;
pub use order_calculator::*;
pub use row_calculator::*;
pub use session::{LineField, ManualLineInput, QuoteSession};
