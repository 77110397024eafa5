//! NFL Data Loader Library
//!
//! Collects NFL reference data from nflverse releases and the ratings and
//! fantasy data pumps, validates it against versioned schemas and turns it
//! into feature tables.
//!
//! ## Features
//!
//! - **Source Loaders**: schedules, events, Vegas lines, venues, players, rosters,
//!   depth charts, injuries, combine, box scores, Madden ratings, approximate
//!   value and fantasy projections, all behind the [`sources::Loader`] trait
//! - **Schema Validation**: every loader output is checked against a
//!   [`schema::Schema`] with type coercion, defaults, ranges and key uniqueness
//! - **Transforms**: keyed joins, rolling and prior-game windows, group-median
//!   imputation, event enrichment and preseason rating adjustment
//! - **Output Formats**: tables, polars frames, records, JSON, CSV or parquet
//! - **Local Mirrors**: any upstream base can point at a directory of files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nfl_data_loader::{workflows, OutputFormat, Season, SourceClient, Week};
//!
//! # async fn example() -> nfl_data_loader::Result<()> {
//! let client = SourceClient::from_env()?;
//! let events = workflows::make_events(
//!     &client,
//!     Season::new(2023),
//!     Some(Week::new(1)),
//!     OutputFormat::Records,
//! )
//! .await?;
//! # let _ = events;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point every upstream at a local mirror instead of the network:
//! ```bash
//! export NFL_DATA_LOADER_DATA_DIR=/srv/nfl-mirror
//! ```

pub mod core;
pub mod error;
pub mod format;
pub mod schema;
pub mod sources;
pub mod table;
pub mod transforms;
pub mod types;
pub mod workflows;

// Re-export commonly used types
pub use crate::core::{SourceClient, SourceConfig};
pub use error::{NflDataError, Result};
pub use format::{format_table, Formatted, OutputFormat};
pub use schema::Schema;
pub use sources::{LoadRequest, Loader};
pub use table::{Record, Table};
pub use types::{FantasyGroup, FantasyMode, PositionGroup, Season, SeasonType, StatGroup, Week};
