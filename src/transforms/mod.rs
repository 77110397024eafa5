//! Table transforms applied between loading and formatting.
//!
//! Every transform takes tables by reference and returns a new table; inputs
//! are never modified. Joins, rolling windows and imputation are generic over
//! column names, the rest know the shared vocabulary.

pub mod events;
pub mod fantasy;
pub mod impute;
pub mod join;
pub mod players;
pub mod rolling;

pub use fantasy::{boom_bust_candidates, BoomBust};
pub use impute::{impute_group_median, median};
pub use join::{merge, merge_many_to_one, JoinHow, JoinSpec};
pub use rolling::{rolling_aggregate, window_features, Aggregate, RollingSpec, WindowMode};
