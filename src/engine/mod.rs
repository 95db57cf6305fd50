//! Expected-value recomputation and the what-if session

mod recompute;
mod session;

pub use recompute::{recompute, recompute_with};
pub use session::{resolve_vocabulary, Session};

/// Column holding model predictions
pub const EXPECTED_COLUMN: &str = "Expected";
