//! Trailing windows over each entity's games.
//!
//! Rows are ordered per entity in polars, every attribute is shifted so a
//! row only sees earlier games, and the window expressions run over the
//! entity partition. Results are written back in the input row order.

use crate::error::{NflDataError, Result};
use crate::table::frame::{ascending, float_cells, indexed_frame, key_exprs, ROW_INDEX};
use crate::table::Table;
use crate::transforms::join::ensure_unique_keys;
use crate::types::time::FIRST_18_WEEK_SEASON;
use polars::prelude::*;
use std::fmt;
use tracing::debug;

/// Shortest span of the exponentially weighted mode.
const EWMA_MIN_SPAN: u32 = 10;
/// Longest span; no season runs past week 22.
const EWMA_MAX_SPAN: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregate {
    #[default]
    Mean,
    Sum,
}

impl Aggregate {
    fn rolling(&self, expr: Expr, window: usize) -> Expr {
        let options = RollingOptionsFixedWindow {
            window_size: window,
            min_periods: 1,
            ..Default::default()
        };
        match self {
            Aggregate::Mean => expr.rolling_mean(options),
            Aggregate::Sum => expr.rolling_sum(options),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Mean => write!(f, "mean"),
            Aggregate::Sum => write!(f, "sum"),
        }
    }
}

/// Trailing window over the last `window` games per entity.
#[derive(Debug, Clone)]
pub struct RollingSpec<'a> {
    pub entity: &'a [&'a str],
    pub order: &'a [&'a str],
    pub window: usize,
    pub aggregate: Aggregate,
}

impl<'a> RollingSpec<'a> {
    pub fn mean(entity: &'a [&'a str], order: &'a [&'a str], window: usize) -> Self {
        Self {
            entity,
            order,
            window,
            aggregate: Aggregate::Mean,
        }
    }

    pub fn sum(entity: &'a [&'a str], order: &'a [&'a str], window: usize) -> Self {
        Self {
            aggregate: Aggregate::Sum,
            ..Self::mean(entity, order, window)
        }
    }

    /// Output column for `attr`, e.g. `rolling3_mean_passing_yards`.
    pub fn column_name(&self, attr: &str) -> String {
        format!("rolling{}_{}_{}", self.window, self.aggregate, attr)
    }
}

/// Run `outputs` (named after `attrs`) over the table sorted by entity and
/// `order`, then copy them back as float columns named by `name`.
fn write_back<F>(
    table: &Table,
    entity: &[&str],
    order: &[&str],
    attrs: &[&str],
    steps: Vec<Vec<Expr>>,
    name: F,
) -> Result<Table>
where
    F: Fn(&str) -> String,
{
    let keys: Vec<&str> = entity.iter().chain(order).copied().collect();
    let mut frame = indexed_frame(table, &keys, attrs)?.sort_by_exprs(key_exprs(&keys), ascending());
    for step in steps {
        frame = frame.with_columns(step);
    }
    let computed = frame
        .sort_by_exprs([col(ROW_INDEX)], SortMultipleOptions::default())
        .collect()?;

    let mut out = table.clone();
    for attr in attrs {
        let column = name(attr);
        out.set_column(&column, float_cells(&computed, &column)?)?;
    }
    Ok(out)
}

/// Trailing aggregate including the current game.
///
/// The window holds the last `window` games; early games use whatever is
/// available and null cells are skipped. `[10, 20, 30, 40]` with a window of
/// two gives `[10, 15, 25, 35]`. Rows keep their input order.
pub fn rolling_aggregate(table: &Table, attrs: &[&str], spec: &RollingSpec<'_>) -> Result<Table> {
    if spec.window == 0 {
        return Err(NflDataError::Config {
            message: "rolling window must cover at least one game".to_string(),
        });
    }
    for attr in attrs {
        table.require_column(attr, "rolling attributes")?;
    }
    for key in spec.entity.iter().chain(spec.order) {
        table.require_column(key, "rolling order")?;
    }

    let partition = key_exprs(spec.entity);
    let outputs = attrs
        .iter()
        .map(|a| {
            spec.aggregate
                .rolling(col(*a), spec.window)
                .over(&partition)
                .alias(spec.column_name(a))
        })
        .collect();
    write_back(table, spec.entity, spec.order, attrs, vec![outputs], |a| {
        spec.column_name(a)
    })
}

/// Feature families computed from prior games only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowMode {
    /// The previous game.
    Last,
    /// Mean of the season's prior games.
    SeasonAvg,
    /// Sum of the season's prior games.
    SeasonTotal,
    /// Mean of every prior game.
    CareerAvg,
    /// Mean of the last three prior games.
    Form,
    /// Exponentially weighted mean of every prior game, span `max(week, 10)`.
    Ewma,
}

impl WindowMode {
    pub fn prefix(&self) -> &'static str {
        match self {
            WindowMode::Last => "last",
            WindowMode::SeasonAvg => "season_avg",
            WindowMode::SeasonTotal => "season_total",
            WindowMode::CareerAvg => "career_avg",
            WindowMode::Form => "form",
            WindowMode::Ewma => "ewma",
        }
    }

    pub fn column_name(&self, attr: &str) -> String {
        format!("{}_{}", self.prefix(), attr)
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Games a season-length fallback looks back over.
fn season_length(season: i64) -> usize {
    if season >= i64::from(FIRST_18_WEEK_SEASON) {
        18
    } else {
        17
    }
}

fn helper(kind: &str, attr: &str) -> String {
    format!("__{}_{}", kind, attr)
}

/// `numerator / denominator`, null when the denominator is zero.
fn ratio(numerator: Expr, denominator: Expr) -> Expr {
    when(denominator.clone().gt(lit(0.0)))
        .then(numerator / denominator)
        .otherwise(lit(NULL))
}

fn ewm(prior: Expr, span: u32) -> Expr {
    prior.ewm_mean(EWMOptions {
        alpha: 2.0 / (f64::from(span) + 1.0),
        adjust: true,
        min_periods: 1,
        ignore_nulls: false,
        ..Default::default()
    })
}

/// Final expression for one attribute given its helper columns.
fn mode_expr(mode: WindowMode, attr: &str, partition: &[Expr]) -> Expr {
    let prior = col(helper("prior", attr));
    let season_fallback = |aggregate: Aggregate| {
        let first_18 = i64::from(FIRST_18_WEEK_SEASON);
        when(col("season").cast(DataType::Float64).gt_eq(lit(first_18 as f64)))
            .then(aggregate.rolling(prior.clone(), season_length(first_18)).over(partition))
            .otherwise(aggregate.rolling(prior.clone(), season_length(first_18 - 1)).over(partition))
    };
    let season_sum = col(helper("season_sum", attr));
    let season_n = col(helper("season_n", attr));

    let expr = match mode {
        WindowMode::Last => prior,
        WindowMode::Form => Aggregate::Mean.rolling(prior, 3).over(partition),
        WindowMode::CareerAvg => ratio(col(helper("career_sum", attr)), col(helper("career_n", attr))),
        WindowMode::SeasonAvg => when(col("__in_season"))
            .then(ratio(season_sum, season_n))
            .otherwise(season_fallback(Aggregate::Mean)),
        WindowMode::SeasonTotal => when(col("__in_season"))
            .then(
                when(season_n.gt(lit(0.0)))
                    .then(season_sum)
                    .otherwise(lit(NULL)),
            )
            .otherwise(season_fallback(Aggregate::Sum)),
        WindowMode::Ewma => {
            let week = col("week").cast(DataType::Float64);
            let mut expr = ewm(prior.clone(), EWMA_MAX_SPAN).over(partition);
            for span in (EWMA_MIN_SPAN + 1..EWMA_MAX_SPAN).rev() {
                expr = when(week.clone().eq(lit(f64::from(span))))
                    .then(ewm(prior.clone(), span).over(partition))
                    .otherwise(expr);
            }
            when(week.lt_eq(lit(f64::from(EWMA_MIN_SPAN))))
                .then(ewm(prior, EWMA_MIN_SPAN).over(partition))
                .otherwise(expr)
        }
    };
    expr.cast(DataType::Float64).alias(mode.column_name(attr))
}

/// Per-entity features over the games before each row.
///
/// The table needs `season` and `week` and must hold one row per entity and
/// week. Season modes average or total the entity's earlier games of the
/// same season. When the entity has no earlier game that season, which
/// includes a first appearance after week one, they fall back to the last
/// season's worth of career games (17, or 18 from 2021). `Ewma` weights every
/// earlier game with span `week` from week 11 on and 10 before. Output
/// columns are `<mode>_<attr>`.
pub fn window_features(
    table: &Table,
    entity: &[&str],
    attrs: &[&str],
    mode: WindowMode,
) -> Result<Table> {
    let keys: Vec<&str> = entity.iter().copied().chain(["season", "week"]).collect();
    ensure_unique_keys(table, &keys, "window features input")?;
    for attr in attrs {
        table.require_column(attr, "window attributes")?;
    }

    let partition = key_exprs(entity);
    let season_partition = key_exprs(&keys[..keys.len() - 1]);

    let mut base = vec![lit(1.0).alias("__one")];
    let mut running = vec![col("__one")
        .cum_sum(false)
        .over(&season_partition)
        .gt(lit(1.0))
        .alias("__in_season")];
    for attr in attrs {
        base.push(col(*attr).fill_null(lit(0.0)).alias(helper("filled", attr)));
        base.push(col(*attr).is_not_null().cast(DataType::Float64).alias(helper("present", attr)));
        running.push(col(*attr).shift(lit(1)).over(&partition).alias(helper("prior", attr)));
        for (kind, source) in [("sum", "filled"), ("n", "present")] {
            let own = col(helper(source, attr));
            running.push(
                (own.clone().cum_sum(false).over(&season_partition) - own.clone())
                    .alias(helper(&format!("season_{}", kind), attr)),
            );
            running.push(
                (own.clone().cum_sum(false).over(&partition) - own)
                    .alias(helper(&format!("career_{}", kind), attr)),
            );
        }
    }
    let outputs = attrs.iter().map(|a| mode_expr(mode, a, &partition)).collect();

    let out = write_back(
        table,
        entity,
        &["season", "week"],
        attrs,
        vec![base, running, outputs],
        |a| mode.column_name(a),
    )?;
    debug!(%mode, attrs = attrs.len(), rows = out.len(), "computed window features");
    Ok(out)
}
