//! Static schema catalogue.

use super::FieldType::{Boolean, Date, Float, Integer, String as Text};
use super::{DefaultValue, Field, Schema};

pub const POSITION_CODES: &[&str] = &[
    "QB", "RB", "FB", "HB", "WR", "TE", "T", "OT", "G", "OG", "C", "OL", "DE", "DT", "NT", "DL",
    "LB", "ILB", "OLB", "MLB", "CB", "S", "SS", "FS", "DB", "SAF", "K", "P", "LS",
];

pub const POSITION_GROUPS: &[&str] = &[
    "quarterback",
    "running_back",
    "wide_receiver",
    "tight_end",
    "o_line",
    "d_line",
    "linebacker",
    "d_field",
    "kick",
    "special_teams",
];

pub const HIGH_POSITION_GROUPS: &[&str] = &["offense", "defense", "special_teams"];

pub const FANTASY_POSITIONS: &[&str] = &["QB", "RB", "WR", "TE", "D/ST", "K"];

pub const GAME_TYPES: &[&str] = &["REG", "WC", "DIV", "CON", "SB"];

pub const SEASON_TYPES: &[&str] = &["REG", "POST"];

pub const CONFERENCES: &[&str] = &["AFC", "NFC"];

pub const DIVISIONS: &[&str] = &["East", "North", "South", "West"];

pub const ROOF_TYPES: &[&str] = &["outdoors", "dome", "closed", "open", "retractable"];

/// Madden attribute columns, overall rating first.
pub const MADDEN_ATTRIBUTES: &[&str] = &[
    "overallrating",
    "agility",
    "acceleration",
    "speed",
    "stamina",
    "strength",
    "toughness",
    "injury",
    "awareness",
    "jumping",
    "trucking",
    "throwpower",
    "throwaccuracyshort",
    "throwaccuracymid",
    "throwaccuracydeep",
    "playaction",
    "throwonrun",
    "carrying",
    "ballcarriervision",
    "stiffarm",
    "spinmove",
    "jukemove",
    "catching",
    "shortrouterunning",
    "midrouterunning",
    "deeprouterunning",
    "spectacularcatch",
    "catchintraffic",
    "release",
    "runblocking",
    "passblocking",
    "impactblocking",
    "mancoverage",
    "zonecoverage",
    "tackle",
    "hitpower",
    "press",
    "pursuit",
    "kickaccuracy",
    "kickpower",
    "return",
];

const SEASON: Field = Field::required("season", Integer, "Season year").within(1920.0, 2100.0);
const WEEK: Field = Field::required("week", Integer, "Week of the season, postseason included")
    .within(1.0, 22.0);
const OPTIONAL_WEEK: Field =
    Field::optional("week", Integer, "Week of the season; null for season totals").within(0.0, 22.0);
const PLAYER_ID: Field = Field::required("player_id", Text, "nflverse (gsis) player id");
const OPTIONAL_PLAYER_ID: Field =
    Field::optional("player_id", Text, "nflverse (gsis) player id when the crosswalk knows it");
const POSITION: Field = Field::optional("position", Text, "Roster position code").one_of(POSITION_CODES);
const POSITION_GROUP: Field =
    Field::optional("position_group", Text, "Position group").one_of(POSITION_GROUPS);
const HIGH_POS_GROUP: Field =
    Field::optional("high_pos_group", Text, "Offense, defense or special teams")
        .one_of(HIGH_POSITION_GROUPS);
const TEAM: Field = Field::optional("team", Text, "Normalized team abbreviation");
const ESPN_ID: Field = Field::required("espn_id", Integer, "ESPN player id; D/ST units are negative");

pub static TEAM_SCHEMA: Schema = Schema {
    name: "team",
    version: "1.0.0",
    description: "One row per franchise per season.",
    base: None,
    key: &["season", "team_id"],
    fields: &[
        SEASON,
        Field::required("team_id", Text, "Normalized team abbreviation"),
        Field::required("name", Text, "Full franchise name"),
        Field::required("nickname", Text, "Franchise nickname"),
        Field::required("conference", Text, "Conference").one_of(CONFERENCES),
        Field::required("division", Text, "Division within the conference").one_of(DIVISIONS),
        Field::optional("espn_team_id", Integer, "ESPN team id"),
    ],
};

pub static PLAYER_IDENTITY: Schema = Schema {
    name: "player_identity",
    version: "1.0.0",
    description: "Identity and position fields shared by every player schema.",
    base: None,
    key: &["player_id"],
    fields: &[
        PLAYER_ID,
        Field::optional("name", Text, "Display name"),
        POSITION,
        POSITION_GROUP,
        HIGH_POS_GROUP,
    ],
};

pub static PLAYER: Schema = Schema {
    name: "player",
    version: "1.1.0",
    description: "nflverse player directory joined with the id crosswalk.",
    base: Some(&PLAYER_IDENTITY),
    key: &["season", "player_id"],
    fields: &[
        SEASON,
        Field::optional("latest_team", Text, "Most recent team"),
        Field::optional("status", Text, "Roster status"),
        Field::required("status_abbr", Text, "First letter of the status; inactive codes fold to N")
            .or_default(DefaultValue::Str("N")),
        Field::optional("birth_date", Date, "Date of birth"),
        Field::optional("height", Float, "Height in inches"),
        Field::optional("weight", Float, "Weight in pounds"),
        Field::optional("college_name", Text, "College"),
        Field::optional("years_of_experience", Integer, "Accrued seasons"),
        Field::optional("rookie_season", Integer, "First season"),
        Field::optional("draft_year", Integer, "Draft year"),
        Field::optional("draft_round", Integer, "Draft round").within(1.0, 17.0),
        Field::optional("draft_pick", Integer, "Overall draft pick").within(1.0, 500.0),
        Field::optional("draft_team", Text, "Drafting team"),
        Field::optional("espn_id", Text, "ESPN player id"),
        Field::optional("pfr_id", Text, "Pro-Football-Reference id"),
    ],
};

pub static EVENT: Schema = Schema {
    name: "event",
    version: "1.2.0",
    description: "One row per game with scores, context and derived metrics.",
    base: None,
    key: &["season", "week", "game_id"],
    fields: &[
        SEASON,
        WEEK,
        Field::required("game_id", Text, "season_week_home_away"),
        Field::required("game_type", Text, "Game type").one_of(GAME_TYPES),
        Field::optional("gameday", Date, "Local game date"),
        Field::optional("gametime", Text, "Local kickoff time (HH:MM)"),
        Field::required("home_team", Text, "Home team abbreviation"),
        Field::required("away_team", Text, "Away team abbreviation"),
        Field::optional("home_score", Integer, "Final home score"),
        Field::optional("away_score", Integer, "Final away score"),
        Field::optional("venue_id", Text, "Stadium id"),
        Field::optional("neutral_site", Boolean, "Played at a neutral site"),
        Field::optional("div_game", Boolean, "Divisional matchup"),
        Field::optional("home_rest", Integer, "Home days of rest"),
        Field::optional("away_rest", Integer, "Away days of rest"),
        Field::optional("roof", Text, "Roof state").one_of(ROOF_TYPES),
        Field::optional("surface", Text, "Playing surface"),
        Field::optional("temp", Float, "Temperature (F)"),
        Field::optional("wind", Float, "Wind (mph)"),
        Field::optional("espn_event_id", Text, "ESPN event id"),
        Field::optional("home_epa", Float, "Home passing plus rushing EPA"),
        Field::optional("away_epa", Float, "Away passing plus rushing EPA"),
        Field::optional("home_implied_win_prob", Float, "No-vig moneyline win probability")
            .within(0.0, 1.0),
        Field::optional("away_implied_win_prob", Float, "No-vig moneyline win probability")
            .within(0.0, 1.0),
    ],
};

pub static VENUE: Schema = Schema {
    name: "venue",
    version: "1.0.0",
    description: "Stadiums used in a season.",
    base: None,
    key: &["season", "venue_id"],
    fields: &[
        SEASON,
        Field::required("venue_id", Text, "Stadium id"),
        Field::optional("name", Text, "Stadium name"),
        Field::optional("roof", Text, "Roof type").one_of(ROOF_TYPES),
        Field::optional("surface", Text, "Playing surface"),
        Field::optional("home_team", Text, "Team hosting the most games there"),
        Field::optional("neutral_site", Boolean, "Only neutral-site games were played there"),
        Field::required("games", Integer, "Games played there this season").within(1.0, 100.0),
    ],
};

pub static VEGAS_LINE: Schema = Schema {
    name: "vegas_line",
    version: "1.0.0",
    description: "Closing lines per game.",
    base: None,
    key: &["season", "week", "game_id"],
    fields: &[
        SEASON,
        WEEK,
        Field::required("game_id", Text, "Game id"),
        Field::optional("spread_line", Float, "Home spread (positive: home favored)"),
        Field::optional("total_line", Float, "Over/under"),
        Field::optional("home_moneyline", Float, "American odds"),
        Field::optional("away_moneyline", Float, "American odds"),
        Field::optional("home_spread_odds", Float, "American odds"),
        Field::optional("away_spread_odds", Float, "American odds"),
        Field::optional("over_odds", Float, "American odds"),
        Field::optional("under_odds", Float, "American odds"),
    ],
};

pub static ROSTER: Schema = Schema {
    name: "roster",
    version: "1.1.0",
    description: "Weekly team rosters.",
    base: Some(&PLAYER_IDENTITY),
    key: &["season", "week", "player_id"],
    fields: &[
        SEASON,
        WEEK,
        TEAM,
        Field::optional("depth_chart_position", Text, "Depth chart position"),
        Field::optional("jersey_number", Text, "Jersey number, digits only"),
        Field::optional("status", Text, "Roster status"),
        Field::required("status_abbr", Text, "First letter of the status; inactive codes fold to N")
            .or_default(DefaultValue::Str("N")),
        Field::optional("years_exp", Integer, "Accrued seasons"),
    ],
};

pub static STARTER: Schema = Schema {
    name: "starter",
    version: "1.0.0",
    description: "Game participation per player from the event pump, joined to schedule events.",
    base: None,
    key: &["game_id", "team", "espn_id"],
    fields: &[
        SEASON,
        WEEK,
        Field::required("game_id", Text, "Game id"),
        Field::optional("game_type", Text, "Game type").one_of(GAME_TYPES),
        Field::required("team", Text, "Team abbreviation"),
        Field::required("espn_id", Text, "ESPN player id"),
        Field::required("starter", Boolean, "Started the game").or_default(DefaultValue::Bool(false)),
        Field::required("did_not_play", Boolean, "Dressed but did not play")
            .or_default(DefaultValue::Bool(false)),
    ],
};

pub static DEPTH_CHART: Schema = Schema {
    name: "depth_chart",
    version: "1.0.0",
    description: "Weekly depth charts.",
    base: None,
    key: &["season", "week", "team", "player_id", "depth_chart_position"],
    fields: &[
        SEASON,
        WEEK,
        Field::required("team", Text, "Team abbreviation"),
        PLAYER_ID,
        Field::optional("depth_team", Integer, "String on the depth chart").within(1.0, 10.0),
        POSITION,
        Field::optional("depth_chart_position", Text, "Depth chart slot"),
        POSITION_GROUP,
    ],
};

pub static WEEKLY_PLAYER_STATS: Schema = Schema {
    name: "weekly_player_stats",
    version: "1.1.0",
    description: "nflverse weekly box score lines.",
    base: Some(&PLAYER_IDENTITY),
    key: &["season", "week", "player_id"],
    fields: &[
        SEASON,
        WEEK,
        Field::required("season_type", Text, "REG or POST").one_of(SEASON_TYPES),
        TEAM,
        Field::optional("opponent_team", Text, "Opponent abbreviation"),
        Field::required("status", Text, "Participation status").or_default(DefaultValue::Str("ACT")),
        Field::optional("completions", Float, "Pass completions"),
        Field::optional("attempts", Float, "Pass attempts"),
        Field::optional("passing_yards", Float, "Passing yards"),
        Field::optional("passing_tds", Float, "Passing touchdowns"),
        Field::optional("interceptions", Float, "Interceptions thrown"),
        Field::optional("sacks", Float, "Sacks taken"),
        Field::optional("passing_epa", Float, "Passing EPA"),
        Field::optional("carries", Float, "Rushing attempts"),
        Field::optional("rushing_yards", Float, "Rushing yards"),
        Field::optional("rushing_tds", Float, "Rushing touchdowns"),
        Field::optional("rushing_epa", Float, "Rushing EPA"),
        Field::optional("receptions", Float, "Receptions"),
        Field::optional("targets", Float, "Targets"),
        Field::optional("receiving_yards", Float, "Receiving yards"),
        Field::optional("receiving_tds", Float, "Receiving touchdowns"),
        Field::optional("receiving_epa", Float, "Receiving EPA"),
        Field::optional("fantasy_points_ppr", Float, "PPR fantasy points"),
    ],
};

pub static INJURY: Schema = Schema {
    name: "injury",
    version: "1.0.0",
    description: "Weekly injury reports, latest report per player and week.",
    base: None,
    key: &["season", "week", "player_id"],
    fields: &[
        SEASON,
        WEEK,
        Field::optional("game_type", Text, "Game type").one_of(GAME_TYPES),
        TEAM,
        PLAYER_ID,
        Field::optional("name", Text, "Player name"),
        POSITION,
        POSITION_GROUP,
        Field::optional("report_primary_injury", Text, "Primary injury on the game report"),
        Field::optional("report_secondary_injury", Text, "Secondary injury on the game report"),
        Field::optional("report_status", Text, "Game status (Out, Doubtful, Questionable)"),
        Field::optional("practice_primary_injury", Text, "Primary injury on the practice report"),
        Field::optional("practice_secondary_injury", Text, "Secondary injury on the practice report"),
        Field::optional("practice_status", Text, "Practice participation"),
        Field::optional("date_modified", Text, "Report timestamp"),
    ],
};

pub static COMBINE: Schema = Schema {
    name: "combine",
    version: "1.0.0",
    description: "NFL scouting combine measurements.",
    base: None,
    key: &[],
    fields: &[
        SEASON,
        Field::optional("draft_year", Integer, "Draft year"),
        Field::optional("draft_team", Text, "Drafting team"),
        Field::optional("draft_round", Integer, "Draft round"),
        Field::optional("draft_ovr", Integer, "Overall pick"),
        Field::optional("pfr_id", Text, "Pro-Football-Reference id"),
        Field::optional("cfb_id", Text, "College football reference id"),
        Field::required("name", Text, "Player name"),
        Field::optional("pos", Text, "Listed combine position"),
        POSITION_GROUP,
        Field::optional("school", Text, "College"),
        Field::optional("ht", Text, "Height as feet-inches"),
        Field::optional("wt", Float, "Weight in pounds"),
        Field::optional("forty", Float, "40-yard dash (s)").within(3.0, 7.0),
        Field::optional("bench", Float, "225lb bench reps").within(0.0, 60.0),
        Field::optional("vertical", Float, "Vertical jump (in)").within(0.0, 60.0),
        Field::optional("broad_jump", Float, "Broad jump (in)").within(0.0, 200.0),
        Field::optional("cone", Float, "3-cone drill (s)").within(5.0, 10.0),
        Field::optional("shuttle", Float, "20-yard shuttle (s)").within(3.0, 7.0),
    ],
};

const fn rating(name: &'static str) -> Field {
    Field::optional(name, Integer, "Madden attribute rating").within(0.0, 99.0)
}

pub static PLAYER_MADDEN: Schema = Schema {
    name: "player_madden",
    version: "1.0.0",
    description: "Madden ratings per player and season.",
    base: Some(&PLAYER_IDENTITY),
    key: &["season", "player_id"],
    fields: &[
        SEASON,
        TEAM,
        Field::optional("madden_id", Text, "Madden player id"),
        Field::required("overallrating", Integer, "Overall rating").within(0.0, 99.0),
        rating("agility"),
        rating("acceleration"),
        rating("speed"),
        rating("stamina"),
        rating("strength"),
        rating("toughness"),
        rating("injury"),
        rating("awareness"),
        rating("jumping"),
        rating("trucking"),
        rating("throwpower"),
        rating("throwaccuracyshort"),
        rating("throwaccuracymid"),
        rating("throwaccuracydeep"),
        rating("playaction"),
        rating("throwonrun"),
        rating("carrying"),
        rating("ballcarriervision"),
        rating("stiffarm"),
        rating("spinmove"),
        rating("jukemove"),
        rating("catching"),
        rating("shortrouterunning"),
        rating("midrouterunning"),
        rating("deeprouterunning"),
        rating("spectacularcatch"),
        rating("catchintraffic"),
        rating("release"),
        rating("runblocking"),
        rating("passblocking"),
        rating("impactblocking"),
        rating("mancoverage"),
        rating("zonecoverage"),
        rating("tackle"),
        rating("hitpower"),
        rating("press"),
        rating("pursuit"),
        rating("kickaccuracy"),
        rating("kickpower"),
        rating("return"),
    ],
};

/// A Madden attribute after the preseason adjustment.
const fn adjusted(name: &'static str) -> Field {
    Field::optional(name, Float, "Adjusted Madden attribute rating").within(0.0, 99.0)
}

pub static PRESEASON_PLAYER: Schema = Schema {
    name: "preseason_player",
    version: "1.0.0",
    description: "Week-one players with imputed measurements and adjusted Madden ratings.",
    base: Some(&PLAYER_IDENTITY),
    key: &["season", "player_id"],
    fields: &[
        SEASON,
        TEAM,
        Field::optional("pfr_id", Text, "Pro-Football-Reference id"),
        Field::optional("madden_id", Text, "Madden player id"),
        Field::optional("college_name", Text, "College; unknown when missing"),
        Field::optional("years_exp", Integer, "Accrued seasons"),
        Field::optional("age", Integer, "Age on September 1").within(15.0, 60.0),
        Field::required("is_rookie", Boolean, "First season in the league"),
        Field::optional("last_season_av", Float, "Approximate value last season"),
        Field::optional("forty", Float, "40-yard dash (s)").within(3.0, 7.0),
        Field::optional("bench", Float, "225lb bench reps").within(0.0, 60.0),
        Field::optional("vertical", Float, "Vertical jump (in)").within(0.0, 60.0),
        Field::optional("broad_jump", Float, "Broad jump (in)").within(0.0, 200.0),
        Field::optional("cone", Float, "3-cone drill (s)").within(5.0, 10.0),
        Field::optional("shuttle", Float, "20-yard shuttle (s)").within(3.0, 7.0),
        adjusted("overallrating"),
        adjusted("agility"),
        adjusted("acceleration"),
        adjusted("speed"),
        adjusted("stamina"),
        adjusted("strength"),
        adjusted("toughness"),
        adjusted("injury"),
        adjusted("awareness"),
        adjusted("jumping"),
        adjusted("trucking"),
        adjusted("throwpower"),
        adjusted("throwaccuracyshort"),
        adjusted("throwaccuracymid"),
        adjusted("throwaccuracydeep"),
        adjusted("playaction"),
        adjusted("throwonrun"),
        adjusted("carrying"),
        adjusted("ballcarriervision"),
        adjusted("stiffarm"),
        adjusted("spinmove"),
        adjusted("jukemove"),
        adjusted("catching"),
        adjusted("shortrouterunning"),
        adjusted("midrouterunning"),
        adjusted("deeprouterunning"),
        adjusted("spectacularcatch"),
        adjusted("catchintraffic"),
        adjusted("release"),
        adjusted("runblocking"),
        adjusted("passblocking"),
        adjusted("impactblocking"),
        adjusted("mancoverage"),
        adjusted("zonecoverage"),
        adjusted("tackle"),
        adjusted("hitpower"),
        adjusted("press"),
        adjusted("pursuit"),
        adjusted("kickaccuracy"),
        adjusted("kickpower"),
        adjusted("return"),
    ],
};

pub static APPROXIMATE_VALUE: Schema = Schema {
    name: "approximate_value",
    version: "1.0.0",
    description: "Pro-Football-Reference approximate value per player season.",
    base: None,
    key: &["season", "pfr_id"],
    fields: &[
        SEASON,
        Field::required("pfr_id", Text, "Pro-Football-Reference id"),
        Field::optional("name", Text, "Player name"),
        TEAM,
        Field::optional("position", Text, "Listed position"),
        Field::required("approximate_value", Float, "Season approximate value"),
    ],
};

pub static FANTASY_PROJECTION: Schema = Schema {
    name: "fantasy_projection",
    version: "1.0.0",
    description: "ESPN fantasy projections, weekly rows or season totals.",
    base: None,
    key: &["season", "week", "espn_id"],
    fields: &[
        SEASON,
        OPTIONAL_WEEK,
        ESPN_ID,
        OPTIONAL_PLAYER_ID,
        Field::optional("name", Text, "Player or unit name"),
        Field::required("position", Text, "Fantasy position").one_of(FANTASY_POSITIONS),
        TEAM,
        Field::optional("percent_owned", Float, "Share of leagues rostering").within(0.0, 100.0),
        Field::optional("percent_started", Float, "Share of leagues starting").within(0.0, 100.0),
        Field::optional("projected_points", Float, "Projected fantasy points"),
        Field::optional("total_points", Float, "Season points scored"),
        Field::optional("projected_total_points", Float, "Projected season points"),
        Field::optional("avg_points", Float, "Average points per game"),
        Field::optional("projected_avg_points", Float, "Projected average points per game"),
    ],
};

pub static WATSON_PROJECTION: Schema = Schema {
    name: "watson_projection",
    version: "1.0.0",
    description: "IBM Watson fantasy projections.",
    base: None,
    key: &["season", "week", "espn_id"],
    fields: &[
        SEASON,
        WEEK,
        ESPN_ID,
        OPTIONAL_PLAYER_ID,
        Field::optional("current_rank", Integer, "Positional rank"),
        Field::optional("opponent_name", Text, "Opponent"),
        Field::optional("opposition_rank", Integer, "Opponent rank against the position"),
        Field::optional("is_on_injured_reserve", Boolean, "On injured reserve"),
        Field::optional("is_suspended", Boolean, "Suspended"),
        Field::optional("is_on_bye", Boolean, "On bye"),
        Field::optional("is_free_agent", Boolean, "Free agent"),
        Field::optional("projection_model_type", Text, "Model type"),
        Field::optional("projection_score", Float, "Projected score"),
        Field::optional("projection_distribution_name", Text, "Distribution family"),
        Field::optional("projection_low_score", Float, "Low projection"),
        Field::optional("projection_high_score", Float, "High projection"),
        Field::optional("projection_simulation_projection", Float, "Simulated projection"),
        Field::optional("breakout_likelihood", Float, "Breakout likelihood (%)").within(0.0, 100.0),
        Field::optional("bust_likelihood", Float, "Bust likelihood (%)").within(0.0, 100.0),
        Field::optional("play_with_injury_likelihood", Float, "Likelihood of playing hurt"),
        Field::optional("play_without_injury_likelihood", Float, "Likelihood of playing healthy"),
        Field::optional("data_timestamp", Text, "Projection timestamp"),
        Field::optional("injury_status_date", Text, "Injury status timestamp"),
    ],
};

pub static FANTASY_RANKING: Schema = Schema {
    name: "fantasy_ranking",
    version: "1.0.0",
    description: "FantasyPros expert consensus rankings per week.",
    base: None,
    key: &["season", "week", "espn_id"],
    fields: &[
        SEASON,
        Field::required("week", Integer, "Week; 0 is the preseason consensus").within(0.0, 22.0),
        ESPN_ID,
        OPTIONAL_PLAYER_ID,
        Field::optional("mergename", Text, "Normalized name"),
        Field::required("fp_page", Text, "Source ranking page"),
        Field::optional("ecr", Float, "Expert consensus rank"),
        Field::optional("sd", Float, "Rank standard deviation"),
        Field::optional("best", Float, "Best rank"),
        Field::optional("worst", Float, "Worst rank"),
        Field::optional("player_owned_avg", Float, "Average ownership"),
        Field::optional("player_owned_espn", Float, "ESPN ownership"),
        Field::optional("player_owned_yahoo", Float, "Yahoo ownership"),
        Field::optional("rank_delta", Float, "Change since last scrape"),
        Field::optional("scrape_date", Date, "Scrape date"),
    ],
};

pub static PLAYER_ID_MAP: Schema = Schema {
    name: "player_id_map",
    version: "1.0.0",
    description: "Cross-provider player id crosswalk.",
    base: None,
    key: &[],
    fields: &[
        Field::optional("gsis_id", Text, "nflverse (gsis) id"),
        Field::optional("espn_id", Integer, "ESPN id"),
        Field::optional("pfr_id", Text, "Pro-Football-Reference id"),
        Field::optional("fantasypros_id", Integer, "FantasyPros id"),
        Field::optional("name", Text, "Player name"),
        Field::optional("merge_name", Text, "Normalized name"),
        Field::optional("position", Text, "Listed position"),
    ],
};

pub static ALL: &[&Schema] = &[
    &TEAM_SCHEMA,
    &PLAYER_IDENTITY,
    &PLAYER,
    &EVENT,
    &VENUE,
    &VEGAS_LINE,
    &ROSTER,
    &STARTER,
    &DEPTH_CHART,
    &WEEKLY_PLAYER_STATS,
    &INJURY,
    &COMBINE,
    &PLAYER_MADDEN,
    &PRESEASON_PLAYER,
    &APPROXIMATE_VALUE,
    &FANTASY_PROJECTION,
    &WATSON_PROJECTION,
    &FANTASY_RANKING,
    &PLAYER_ID_MAP,
];
