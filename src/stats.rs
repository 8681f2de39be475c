/// Statistics engine: dashboard aggregates over a table snapshot
///
/// This module handles:
/// - Time-bucketed trend series (daily / weekly / monthly)
/// - Value distributions by item model and by customer
/// - Top-N rankings with a deterministic tie-break
/// - The combined `DashboardStatistics` view
///
/// Everything here is derived and ephemeral: recomputed from a snapshot on
/// every request, never persisted. An empty or absent table produces the
/// canonical all-zero dashboard rather than an error.
use crate::record::{RecordTable, ServiceRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_TOP_N: usize = 5;
pub const DAILY_WINDOW: usize = 30;
pub const WEEKLY_WINDOW: usize = 12;
pub const MONTHLY_WINDOW: usize = 12;

/// Time-bucket size for trend aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Period label for a date. Weekly uses the Sunday-start week-of-year
    /// scheme (`%U`): days before the year's first Sunday land in week 00.
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Daily => date.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => date.format("%Y-W%U").to_string(),
            Granularity::Monthly => date.format("%Y-%m").to_string(),
        }
    }
}

/// Record field a distribution or ranking is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Model,
    Customer,
}

impl GroupField {
    fn value<'a>(&self, record: &'a ServiceRecord) -> &'a str {
        match self {
            GroupField::Model => &record.item,
            GroupField::Customer => &record.customer,
        }
    }
}

/// One entry of a top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntry {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub daily: BTreeMap<String, u64>,
    pub weekly: BTreeMap<String, u64>,
    pub monthly: BTreeMap<String, u64>,
}

/// Derived dashboard view; field names follow the statistics query surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStatistics {
    pub total_units_in: u64,
    pub units_in_trend: TrendSeries,
    pub units_by_model: HashMap<String, u64>,
    pub units_by_company: HashMap<String, u64>,
    pub top_models: Vec<TopEntry>,
    pub top_customers: Vec<TopEntry>,
}

/// Count records per calendar period of `granularity`, keeping only the most
/// recent `window` periods. Records with a missing Date In are skipped.
///
/// All three label formats sort chronologically as strings, so the map's
/// natural order is ascending time.
pub fn trend(table: &RecordTable, granularity: Granularity, window: usize) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in table.records() {
        let Some(date) = record.date_in else {
            continue;
        };
        *counts.entry(granularity.label(date)).or_insert(0) += 1;
    }
    let skip = counts.len().saturating_sub(window);
    counts.into_iter().skip(skip).collect()
}

/// Occurrence count per distinct value of `field`. Records with an empty
/// value contribute an entry under the empty string.
pub fn distribution_by(table: &RecordTable, field: GroupField) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in table.records() {
        *counts.entry(field.value(record).to_string()).or_insert(0) += 1;
    }
    counts
}

/// The `n` distinct values of `field` with the highest occurrence count,
/// descending. Ties keep first-encountered order in the table.
pub fn top_n(table: &RecordTable, field: GroupField, n: usize) -> Vec<TopEntry> {
    ranked(table.records().iter().map(|r| field.value(r)), n)
}

/// Accumulate counts in first-encountered order, then stable-sort by
/// descending count so ties preserve that order.
fn ranked<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<TopEntry> {
    let mut order: Vec<TopEntry> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for value in values {
        match seen.get(value) {
            Some(&i) => order[i].count += 1,
            None => {
                seen.insert(value.to_string(), order.len());
                order.push(TopEntry { value: value.to_string(), count: 1 });
            }
        }
    }
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(n);
    order
}

/// The aggregate dashboard call: totals, trend series (last 30 days / 12
/// weeks / 12 months), both distributions, and both top-N lists.
pub fn dashboard_statistics(table: Option<&RecordTable>, top: usize) -> DashboardStatistics {
    let Some(table) = table else {
        return DashboardStatistics::default();
    };
    DashboardStatistics {
        total_units_in: table.len() as u64,
        units_in_trend: TrendSeries {
            daily: trend(table, Granularity::Daily, DAILY_WINDOW),
            weekly: trend(table, Granularity::Weekly, WEEKLY_WINDOW),
            monthly: trend(table, Granularity::Monthly, MONTHLY_WINDOW),
        },
        units_by_model: distribution_by(table, GroupField::Model),
        units_by_company: distribution_by(table, GroupField::Customer),
        top_models: top_n(table, GroupField::Model, top),
        top_customers: top_n(table, GroupField::Customer, top),
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
