//! Source loaders.
//!
//! One module per upstream provider. Every loader fetches its reference
//! file, renames columns to the shared vocabulary, derives the shared
//! columns and validates the result against its schema before returning.
//!
//! - `schedule`: games, events, Vegas lines, venues and week windows
//! - `teams`: static franchise reference
//! - `players`, `ids`: player directory and the id crosswalk
//! - `rosters`, `depth_chart`, `injuries`, `combine`: nflverse player tables
//! - `starters`: game participation from the event pump
//! - `boxscores`: weekly player statistics
//! - `madden`, `av`: ratings and approximate value
//! - `fantasy`: projections, Watson projections and expert rankings
//! - `calendar`: NFL week for a date from the scoreboard calendar

pub mod av;
pub mod boxscores;
pub mod calendar;
pub mod combine;
pub mod depth_chart;
pub mod fantasy;
pub mod ids;
pub mod injuries;
pub mod madden;
pub mod normalize;
pub mod players;
pub mod rosters;
pub mod schedule;
pub mod starters;
pub mod teams;

use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::Schema;
use crate::table::Table;
use crate::types::{PositionGroup, Season, SeasonType, Week};
use async_trait::async_trait;

pub const NFLVERSE: &str = "nflverse";
pub const SCHEDULE: &str = "schedule";
pub const PLAYER_IDS: &str = "player_ids";
pub const MISSING_DRAFT: &str = "missing_draft";
pub const MADDEN: &str = "madden";
pub const FANTASY: &str = "fantasy";
pub const FANTASYPROS: &str = "fantasypros";
pub const SCOREBOARD: &str = "scoreboard";
pub const EVENTS: &str = "events";

/// Parameters of one load call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub season: Season,
    pub week: Option<Week>,
    pub season_type: Option<SeasonType>,
    pub position_group: Option<PositionGroup>,
}

impl LoadRequest {
    pub fn new(season: Season) -> Self {
        Self {
            season,
            week: None,
            season_type: None,
            position_group: None,
        }
    }

    pub fn with_week(mut self, week: Week) -> Self {
        self.week = Some(week);
        self
    }

    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = Some(season_type);
        self
    }

    pub fn with_position_group(mut self, group: PositionGroup) -> Self {
        self.position_group = Some(group);
        self
    }

    /// Reject weeks the season never had.
    pub fn validate(&self) -> Result<()> {
        if let Some(week) = self.week {
            week.validate_for(self.season)?;
        }
        Ok(())
    }
}

/// A provider that produces one validated table per request.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Provider-qualified name used in logs.
    fn name(&self) -> &'static str;

    /// Schema every returned table satisfies.
    fn schema(&self) -> &'static Schema;

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table>;
}
