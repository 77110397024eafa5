//! Football position codes and the groups they roll up into.

use crate::error::NflDataError;
use crate::types::filters::StatGroup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roster position codes as published by nflverse and the rating pumps.
///
/// Every code maps to exactly one [`PositionGroup`], and every group to one
/// [`HighPositionGroup`].
///
/// # Examples
///
/// ```rust
/// use nfl_data_loader::types::{Position, PositionGroup};
///
/// let pos: Position = "olb".parse().unwrap();
/// assert_eq!(pos.group(), PositionGroup::Linebacker);
/// assert_eq!(pos.to_string(), "OLB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    QB,
    RB,
    FB,
    HB,
    WR,
    TE,
    T,
    OT,
    G,
    OG,
    C,
    OL,
    DE,
    DT,
    NT,
    DL,
    LB,
    ILB,
    OLB,
    MLB,
    CB,
    S,
    SS,
    FS,
    DB,
    SAF,
    K,
    P,
    LS,
}

impl Position {
    pub const ALL: [Position; 29] = [
        Position::QB,
        Position::RB,
        Position::FB,
        Position::HB,
        Position::WR,
        Position::TE,
        Position::T,
        Position::OT,
        Position::G,
        Position::OG,
        Position::C,
        Position::OL,
        Position::DE,
        Position::DT,
        Position::NT,
        Position::DL,
        Position::LB,
        Position::ILB,
        Position::OLB,
        Position::MLB,
        Position::CB,
        Position::S,
        Position::SS,
        Position::FS,
        Position::DB,
        Position::SAF,
        Position::K,
        Position::P,
        Position::LS,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::FB => "FB",
            Position::HB => "HB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::T => "T",
            Position::OT => "OT",
            Position::G => "G",
            Position::OG => "OG",
            Position::C => "C",
            Position::OL => "OL",
            Position::DE => "DE",
            Position::DT => "DT",
            Position::NT => "NT",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::ILB => "ILB",
            Position::OLB => "OLB",
            Position::MLB => "MLB",
            Position::CB => "CB",
            Position::S => "S",
            Position::SS => "SS",
            Position::FS => "FS",
            Position::DB => "DB",
            Position::SAF => "SAF",
            Position::K => "K",
            Position::P => "P",
            Position::LS => "LS",
        }
    }

    pub fn group(&self) -> PositionGroup {
        match self {
            Position::QB => PositionGroup::Quarterback,
            Position::RB | Position::FB | Position::HB => PositionGroup::RunningBack,
            Position::WR => PositionGroup::WideReceiver,
            Position::TE => PositionGroup::TightEnd,
            Position::T
            | Position::OT
            | Position::G
            | Position::OG
            | Position::C
            | Position::OL => PositionGroup::OLine,
            Position::DE | Position::DT | Position::NT | Position::DL => PositionGroup::DLine,
            Position::LB | Position::ILB | Position::OLB | Position::MLB => {
                PositionGroup::Linebacker
            }
            Position::CB
            | Position::S
            | Position::SS
            | Position::FS
            | Position::DB
            | Position::SAF => PositionGroup::DField,
            Position::K | Position::P => PositionGroup::Kick,
            Position::LS => PositionGroup::SpecialTeams,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Position {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Position::ALL
            .iter()
            .find(|p| p.code() == upper)
            .copied()
            .ok_or_else(|| NflDataError::InvalidPosition {
                position: s.to_string(),
            })
    }
}

/// Position groups used for imputation, filtering and rating adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionGroup {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    OLine,
    DLine,
    Linebacker,
    DField,
    Kick,
    SpecialTeams,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 10] = [
        PositionGroup::Quarterback,
        PositionGroup::RunningBack,
        PositionGroup::WideReceiver,
        PositionGroup::TightEnd,
        PositionGroup::OLine,
        PositionGroup::DLine,
        PositionGroup::Linebacker,
        PositionGroup::DField,
        PositionGroup::Kick,
        PositionGroup::SpecialTeams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionGroup::Quarterback => "quarterback",
            PositionGroup::RunningBack => "running_back",
            PositionGroup::WideReceiver => "wide_receiver",
            PositionGroup::TightEnd => "tight_end",
            PositionGroup::OLine => "o_line",
            PositionGroup::DLine => "d_line",
            PositionGroup::Linebacker => "linebacker",
            PositionGroup::DField => "d_field",
            PositionGroup::Kick => "kick",
            PositionGroup::SpecialTeams => "special_teams",
        }
    }

    pub fn high_group(&self) -> HighPositionGroup {
        match self {
            PositionGroup::Quarterback
            | PositionGroup::RunningBack
            | PositionGroup::WideReceiver
            | PositionGroup::TightEnd
            | PositionGroup::OLine => HighPositionGroup::Offense,
            PositionGroup::DLine | PositionGroup::Linebacker | PositionGroup::DField => {
                HighPositionGroup::Defense
            }
            PositionGroup::Kick | PositionGroup::SpecialTeams => HighPositionGroup::SpecialTeams,
        }
    }

    /// Position codes belonging to this group.
    pub fn positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .filter(|p| p.group() == *self)
            .copied()
            .collect()
    }

    /// Box score file that carries this group's statistics.
    pub fn stat_group(&self) -> StatGroup {
        match self.high_group() {
            HighPositionGroup::Offense => StatGroup::Offense,
            HighPositionGroup::Defense => StatGroup::Defense,
            HighPositionGroup::SpecialTeams => StatGroup::Kicking,
        }
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PositionGroup {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PositionGroup::ALL
            .iter()
            .find(|g| g.as_str() == lower)
            .copied()
            .ok_or_else(|| NflDataError::InvalidPosition {
                position: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighPositionGroup {
    Offense,
    Defense,
    SpecialTeams,
}

impl HighPositionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighPositionGroup::Offense => "offense",
            HighPositionGroup::Defense => "defense",
            HighPositionGroup::SpecialTeams => "special_teams",
        }
    }
}

impl fmt::Display for HighPositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Group name for a raw position code, `None` for codes outside the enumeration.
pub fn position_group_for(code: &str) -> Option<PositionGroup> {
    code.parse::<Position>().ok().map(|p| p.group())
}

/// High group name for a raw position group string.
pub fn high_group_for(group: &str) -> Option<HighPositionGroup> {
    group.parse::<PositionGroup>().ok().map(|g| g.high_group())
}
