//! Madden ratings from the ratings pump.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::PLAYER_MADDEN;
use crate::schema::Schema;
use crate::sources::normalize::{
    drop_blank, filter_position_group, normalize_teams, with_position_groups,
};
use crate::sources::{LoadRequest, Loader, MADDEN};
use crate::table::Table;
use crate::types::Season;
use async_trait::async_trait;
use tracing::debug;

pub fn madden_path(season: Season) -> String {
    format!("madden/dataset/{}.parquet", season)
}

/// Ratings shaping without the fetch. Rows the pump could not match to a
/// player id are dropped.
pub fn madden_ratings_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let table = drop_blank(&normalize_teams(raw), "player_id");
    let table = if table.has_column("position") {
        with_position_groups(&table, "position", true)
    } else {
        table
    };
    let table = filter_position_group(&table, request.position_group);
    PLAYER_MADDEN.validate_table(&table)
}

pub async fn collect_madden_ratings(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let location = join_location(&client.config().madden_base, &madden_path(request.season));
    let raw = client.fetch_table(MADDEN, &location).await?;
    let ratings = madden_ratings_from(&raw, request)?;
    debug!(season = %request.season, rows = ratings.len(), "collected madden ratings");
    Ok(ratings)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaddenLoader;

#[async_trait]
impl Loader for MaddenLoader {
    fn name(&self) -> &'static str {
        "madden.ratings"
    }

    fn schema(&self) -> &'static Schema {
        &PLAYER_MADDEN
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_madden_ratings(client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_madden_shaping() {
        let raw = Table::from_rows(
            vec![
                "season".into(),
                "player_id".into(),
                "name".into(),
                "position".into(),
                "team".into(),
                "overallrating".into(),
                "speed".into(),
            ],
            vec![
                vec![json!(2023), json!("00-0033873"), json!("Patrick Mahomes"), json!("QB"), json!("KC"), json!(99), json!(76)],
                vec![json!(2023), json!(null), json!("Unmatched"), json!("WR"), json!("SD"), json!(60), json!(80)],
            ],
        )
        .unwrap();
        let ratings = madden_ratings_from(&raw, &LoadRequest::new(Season::new(2023))).unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings.row(0).get_str("position_group"), Some("quarterback"));
        assert!(ratings.has_column("kickpower"));
    }

    #[test]
    fn test_rating_above_99_rejected() {
        let raw = Table::from_rows(
            vec!["season".into(), "player_id".into(), "overallrating".into()],
            vec![vec![json!(2023), json!("00-1"), json!(104)]],
        )
        .unwrap();
        assert!(madden_ratings_from(&raw, &LoadRequest::new(Season::new(2023))).is_err());
    }
}
