//! Type-safe wrappers and enums for NFL data.

pub mod filters;
pub mod ids;
pub mod position;
pub mod time;

pub use filters::{FantasyGroup, FantasyMode, SeasonType, StatGroup};
pub use ids::{normalize_team_code, EspnId, GameId, PlayerId, TeamId, VenueId};
pub use position::{HighPositionGroup, Position, PositionGroup};
pub use time::{Season, Week};
