//! Title search
//!
//! [`FuzzyMatcher`] scores one title against a query. [`SearchSession`] runs
//! whole-catalog searches in the background with debounce and cancellation.

mod matcher;
mod session;

pub use matcher::{score, FuzzyMatcher};
pub use session::{CancellationToken, SearchSession};
