//! Cross-provider player id crosswalk.

use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::PLAYER_ID_MAP;
use crate::schema::Schema;
use crate::sources::{LoadRequest, Loader, PLAYER_IDS};
use crate::table::Table;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

const COLUMNS: &[&str] = &[
    "gsis_id",
    "espn_id",
    "pfr_id",
    "fantasypros_id",
    "name",
    "merge_name",
    "position",
];

/// Validated crosswalk with one id per provider column.
pub async fn collect_player_ids(client: &SourceClient) -> Result<Table> {
    let location = client.config().player_ids_url.clone();
    let raw = client.fetch_table(PLAYER_IDS, &location).await?;
    let table = PLAYER_ID_MAP.validate_table(&raw.select_existing(COLUMNS))?;
    debug!(rows = table.len(), "loaded player id crosswalk");
    Ok(table)
}

/// Lookups built from the crosswalk.
#[derive(Debug, Clone, Default)]
pub struct IdCrosswalk {
    espn_to_gsis: HashMap<i64, String>,
    gsis_to_espn: HashMap<String, i64>,
    fantasypros: HashMap<i64, (Option<String>, Option<i64>)>,
}

impl IdCrosswalk {
    pub fn from_table(table: &Table) -> Self {
        let mut out = Self::default();
        for row in table.iter() {
            let gsis = row.get_str("gsis_id").filter(|s| !s.is_empty());
            let espn = row.get_i64("espn_id");
            if let (Some(gsis), Some(espn)) = (gsis, espn) {
                out.espn_to_gsis.entry(espn).or_insert_with(|| gsis.to_string());
                out.gsis_to_espn.entry(gsis.to_string()).or_insert(espn);
            }
            if let Some(fp) = row.get_i64("fantasypros_id") {
                out.fantasypros
                    .entry(fp)
                    .or_insert_with(|| (gsis.map(str::to_string), espn));
            }
        }
        out
    }

    pub async fn load(client: &SourceClient) -> Result<Self> {
        Ok(Self::from_table(&collect_player_ids(client).await?))
    }

    pub fn gsis_for_espn(&self, espn_id: i64) -> Option<&str> {
        self.espn_to_gsis.get(&espn_id).map(String::as_str)
    }

    pub fn espn_for_gsis(&self, gsis_id: &str) -> Option<i64> {
        self.gsis_to_espn.get(gsis_id).copied()
    }

    /// `(gsis_id, espn_id)` for a FantasyPros id.
    pub fn for_fantasypros(&self, fantasypros_id: i64) -> Option<&(Option<String>, Option<i64>)> {
        self.fantasypros.get(&fantasypros_id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerIdLoader;

#[async_trait]
impl Loader for PlayerIdLoader {
    fn name(&self) -> &'static str {
        "dynastyprocess.player_ids"
    }

    fn schema(&self) -> &'static Schema {
        &PLAYER_ID_MAP
    }

    async fn collect(&self, client: &SourceClient, _request: &LoadRequest) -> Result<Table> {
        collect_player_ids(client).await
    }
}
