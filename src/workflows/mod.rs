//! End-to-end pipelines: load, transform, format.
//!
//! Each `make_*` function runs its loads sequentially and hands the result
//! to [`format_table`](crate::format::format_table). The `*_from` companions
//! do the same work on tables already in hand and are what the `make_*`
//! functions call after fetching.

pub mod events;
pub mod fantasy;
pub mod players;

pub use events::make_events;
pub use fantasy::{make_boom_bust_candidates, make_player_fantasy};
pub use players::{make_player_stats, make_preseason_players, make_weekly_player_features};

use crate::error::Result;
use crate::table::Table;
use tracing::warn;

/// An optional upstream: a missing file becomes an empty table, anything
/// else still fails.
pub(crate) fn optional_source(result: Result<Table>, what: &str) -> Result<Table> {
    match result {
        Ok(table) => Ok(table),
        Err(e) if e.is_source_unavailable() => {
            warn!(source = what, error = %e, "optional source unavailable, continuing without it");
            Ok(Table::default())
        }
        Err(e) => Err(e),
    }
}
