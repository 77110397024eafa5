//! Upstream source locations and client settings.

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "NFL_DATA_LOADER_";
pub const DATA_DIR_ENV_VAR: &str = "NFL_DATA_LOADER_DATA_DIR";
pub const TIMEOUT_ENV_VAR: &str = "NFL_DATA_LOADER_TIMEOUT_SECS";
pub const USER_AGENT_ENV_VAR: &str = "NFL_DATA_LOADER_USER_AGENT";

pub const NFLVERSE_BASE: &str = "https://github.com/nflverse/nflverse-data/releases/download";
pub const MADDEN_BASE: &str = "https://github.com/theedgepredictor/nfl-madden-data/raw/main/data";
pub const FANTASY_BASE: &str =
    "https://github.com/theedgepredictor/fantasy-data-pump/raw/main/processed";
pub const EVENT_BASE: &str = "https://github.com/theedgepredictor/event-data-pump/raw/main";
pub const SCHEDULE_URL: &str = "http://www.habitatring.com/games.csv";
pub const PLAYER_IDS_URL: &str =
    "https://raw.githubusercontent.com/dynastyprocess/data/master/files/db_playerids.csv";
pub const FANTASYPROS_ECR_URL: &str =
    "https://raw.githubusercontent.com/dynastyprocess/data/master/files/db_fpecr.parquet";
pub const MISSING_DRAFT_URL: &str = "https://github.com/greerreNFL/nfeloqb/raw/refs/heads/main/nfeloqb/Manual%20Data/missing_draft_data.csv";
/// `{date}` is replaced by `YYYYMMDD`.
pub const SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard?dates={date}";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where every upstream lives and how to reach it.
///
/// A base that does not start with `http://` or `https://` is read as a
/// local directory (or file) of reference data with the same layout as the
/// remote source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub nflverse_base: String,
    pub madden_base: String,
    pub fantasy_base: String,
    pub event_base: String,
    pub schedule_url: String,
    pub player_ids_url: String,
    pub fantasypros_ecr_url: String,
    pub missing_draft_url: String,
    pub scoreboard_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            nflverse_base: NFLVERSE_BASE.to_string(),
            madden_base: MADDEN_BASE.to_string(),
            fantasy_base: FANTASY_BASE.to_string(),
            event_base: EVENT_BASE.to_string(),
            schedule_url: SCHEDULE_URL.to_string(),
            player_ids_url: PLAYER_IDS_URL.to_string(),
            fantasypros_ecr_url: FANTASYPROS_ECR_URL.to_string(),
            missing_draft_url: MISSING_DRAFT_URL.to_string(),
            scoreboard_url: SCOREBOARD_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("nfl-data-loader/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SourceConfig {
    /// Every source read from one local directory.
    ///
    /// Layout: `nflverse/`, `madden/`, `fantasy/`, `events/`, `games.csv`,
    /// `db_playerids.csv`, `db_fpecr.parquet`, `missing_draft_data.csv` and
    /// `scoreboard/{date}.json`.
    pub fn local(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let join = |p: &str| dir.join(p).to_string_lossy().into_owned();
        Self {
            nflverse_base: join("nflverse"),
            madden_base: join("madden"),
            fantasy_base: join("fantasy"),
            event_base: join("events"),
            schedule_url: join("games.csv"),
            player_ids_url: join("db_playerids.csv"),
            fantasypros_ecr_url: join("db_fpecr.parquet"),
            missing_draft_url: join("missing_draft_data.csv"),
            scoreboard_url: join("scoreboard/{date}.json"),
            ..Self::default()
        }
    }

    /// Defaults overridden by `NFL_DATA_LOADER_*` variables.
    ///
    /// `NFL_DATA_LOADER_DATA_DIR` switches every source to [`SourceConfig::local`]
    /// before the per-source variables apply.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(DATA_DIR_ENV_VAR) {
            Ok(dir) if !dir.trim().is_empty() => Self::local(dir.trim()),
            _ => Self::default(),
        };

        let overrides: [(&str, &mut String); 9] = [
            ("NFLVERSE_BASE", &mut config.nflverse_base),
            ("MADDEN_BASE", &mut config.madden_base),
            ("FANTASY_BASE", &mut config.fantasy_base),
            ("EVENT_BASE", &mut config.event_base),
            ("SCHEDULE_URL", &mut config.schedule_url),
            ("PLAYER_IDS_URL", &mut config.player_ids_url),
            ("FANTASYPROS_ECR_URL", &mut config.fantasypros_ecr_url),
            ("MISSING_DRAFT_URL", &mut config.missing_draft_url),
            ("SCOREBOARD_URL", &mut config.scoreboard_url),
        ];
        for (suffix, slot) in overrides {
            if let Ok(value) = std::env::var(format!("{}{}", ENV_PREFIX, suffix)) {
                if !value.trim().is_empty() {
                    *slot = value.trim().to_string();
                }
            }
        }

        if let Ok(secs) = std::env::var(TIMEOUT_ENV_VAR) {
            config.timeout = Duration::from_secs(secs.trim().parse::<u64>()?);
        }
        if let Ok(agent) = std::env::var(USER_AGENT_ENV_VAR) {
            config.user_agent = agent;
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// True when `location` must be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join a base and a relative path with exactly one separator.
pub fn join_location(base: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep every env mutation in one test.
    #[test]
    fn test_from_env_overrides() {
        std::env::remove_var(DATA_DIR_ENV_VAR);
        std::env::set_var("NFL_DATA_LOADER_SCHEDULE_URL", "/tmp/games.csv");
        std::env::set_var(TIMEOUT_ENV_VAR, "5");

        let config = SourceConfig::from_env().unwrap();
        assert_eq!(config.schedule_url, "/tmp/games.csv");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.nflverse_base, NFLVERSE_BASE);

        std::env::set_var(TIMEOUT_ENV_VAR, "soon");
        assert!(SourceConfig::from_env().is_err());

        std::env::set_var(DATA_DIR_ENV_VAR, "/data/nfl");
        std::env::remove_var(TIMEOUT_ENV_VAR);
        let config = SourceConfig::from_env().unwrap();
        assert!(config.nflverse_base.starts_with("/data/nfl"));
        assert_eq!(config.schedule_url, "/tmp/games.csv");

        std::env::remove_var(DATA_DIR_ENV_VAR);
        std::env::remove_var("NFL_DATA_LOADER_SCHEDULE_URL");
    }

    #[test]
    fn test_local_layout() {
        let config = SourceConfig::local("/srv/ref");
        assert_eq!(config.schedule_url, "/srv/ref/games.csv");
        assert_eq!(config.scoreboard_url, "/srv/ref/scoreboard/{date}.json");
        assert_eq!(config.event_base, "/srv/ref/events");
        assert!(!is_remote(&config.madden_base));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote(NFLVERSE_BASE));
        assert!(is_remote("HTTP://example.com/a.csv"));
        assert!(!is_remote("./data/games.csv"));
    }

    #[test]
    fn test_join_location() {
        assert_eq!(
            join_location("https://x/releases/download/", "/players/a.parquet"),
            "https://x/releases/download/players/a.parquet"
        );
        assert_eq!(join_location("/tmp/nflverse", "a.csv"), "/tmp/nflverse/a.csv");
    }
}
