//! NFL week lookup from the ESPN scoreboard calendar.

use crate::core::SourceClient;
use crate::error::{NflDataError, Result};
use crate::sources::SCOREBOARD;
use crate::types::Week;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde_json::Value;
use tracing::debug;

/// Regular season length assumed when the calendar lists no regular weeks.
const DEFAULT_MAX_REGULAR_WEEK: u16 = 18;

/// Where a date falls in the NFL calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWeek {
    /// 0 in the preseason and offseason; postseason rounds continue after
    /// the last regular week.
    pub week: u16,
    pub season_year: i64,
    /// Block label, e.g. `Regular Season`.
    pub season_type: String,
    /// Entry label, e.g. `Week 7` or `Super Bowl`.
    pub detail: String,
}

/// Noon in New York on `date`. Matching at midday keeps dates clear of the
/// calendar's 07:00Z day boundaries.
pub fn noon_eastern(date: NaiveDate) -> Option<DateTime<Utc>> {
    let noon = date.and_hms_opt(12, 0, 0)?;
    New_York
        .from_local_datetime(&noon)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.fZ"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn window(node: &Value) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_instant(node.get("startDate")?.as_str()?)?;
    let end = parse_instant(node.get("endDate")?.as_str()?)?;
    Some((start, end))
}

fn entry_value(entry: &Value) -> Option<u16> {
    match entry.get("value")? {
        Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn label(node: &Value) -> &str {
    node.get("label").and_then(Value::as_str).unwrap_or_default()
}

/// Week of `date` in a scoreboard payload.
///
/// Entry windows are tried first, then whole blocks. Preseason and offseason
/// dates are week 0, regular season dates carry the entry value and
/// postseason rounds count on from the last regular week.
pub fn week_for_date(payload: &Value, date: NaiveDate) -> Result<CalendarWeek> {
    let league = payload
        .get("leagues")
        .and_then(Value::as_array)
        .and_then(|l| l.first())
        .ok_or_else(|| NflDataError::integrity("scoreboard payload has no leagues"))?;
    let season_year = league
        .get("season")
        .and_then(|s| s.get("year"))
        .and_then(Value::as_i64)
        .unwrap_or_else(|| i64::from(date.year()));
    let blocks = league
        .get("calendar")
        .and_then(Value::as_array)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| NflDataError::integrity("scoreboard payload has no calendar"))?;

    let max_regular_week = blocks
        .iter()
        .filter(|b| label(b).to_lowercase().contains("regular"))
        .flat_map(|b| b.get("entries").and_then(Value::as_array).into_iter().flatten())
        .filter_map(entry_value)
        .max()
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_MAX_REGULAR_WEEK);

    let noon = noon_eastern(date)
        .ok_or_else(|| NflDataError::integrity(format!("no noon in New York on {}", date)))?;
    let inside = |node: &Value| window(node).map(|(s, e)| s <= noon && noon < e).unwrap_or(false);

    let by_entry = blocks.iter().find_map(|block| {
        block
            .get("entries")
            .and_then(Value::as_array)
            .and_then(|entries| entries.iter().find(|e| inside(*e)))
            .map(|entry| (block, Some(entry)))
    });
    let (block, entry) = by_entry
        .or_else(|| blocks.iter().find(|b| inside(*b)).map(|b| (b, None)))
        .ok_or_else(|| {
            NflDataError::integrity(format!("no calendar entry covers {}", date))
        })?;

    let season_type = label(block).to_string();
    let detail = entry
        .map(|e| {
            let primary = label(e);
            if primary.is_empty() {
                e.get("alternateLabel").and_then(Value::as_str).unwrap_or_default()
            } else {
                primary
            }
        })
        .filter(|d| !d.is_empty())
        .unwrap_or(season_type.as_str())
        .to_string();
    let value = entry.and_then(entry_value);

    let kind = season_type.to_lowercase();
    let week = if kind.contains("preseason") || kind.contains("off") {
        0
    } else if kind.contains("regular") {
        value.ok_or_else(|| NflDataError::integrity("regular season entry has no value"))?
    } else if kind.contains("post") {
        let round = value.ok_or_else(|| NflDataError::integrity("postseason entry has no value"))?;
        max_regular_week + round.saturating_sub(1)
    } else {
        0
    };

    Ok(CalendarWeek {
        week,
        season_year,
        season_type,
        detail,
    })
}

/// Scoreboard location for one day.
pub fn scoreboard_location(template: &str, date: NaiveDate) -> String {
    template.replace("{date}", &date.format("%Y%m%d").to_string())
}

pub async fn fetch_calendar(client: &SourceClient, date: NaiveDate) -> Result<CalendarWeek> {
    let location = scoreboard_location(&client.config().scoreboard_url, date);
    let payload = client.fetch_json(SCOREBOARD, &location).await?;
    let week = week_for_date(&payload, date)?;
    debug!(%date, week = week.week, season_type = %week.season_type, "resolved calendar week");
    Ok(week)
}

/// Week to load for `date`; the off weeks read as week 1.
pub async fn week_on(client: &SourceClient, date: NaiveDate) -> Result<Week> {
    let found = fetch_calendar(client, date).await?;
    Ok(Week::new(found.week.max(1)))
}

/// Week to load today.
pub async fn current_week(client: &SourceClient) -> Result<Week> {
    week_on(client, Utc::now().date_naive()).await
}
