//! Pure scoring, filtering and ranking over a borrowed [`Dataset`].
//!
//! Nothing here performs I/O or keeps state between calls; every function is
//! total over its input.
//!
//! [`Dataset`]: crate::types::model::Dataset

pub mod aggregate;
pub mod constraints;
pub mod rank;

pub use aggregate::{category_average, category_averages, overall_score, score_model};
pub use constraints::{matches, Bound, Comparison, ConstraintKey, ConstraintSet};
pub use rank::rank;
