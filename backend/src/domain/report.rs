//! Aggregation transforms for the dashboard charts.
//!
//! The server exposes exactly one aggregate read (`GET /record/by-category`,
//! built from [`summarise_by_category`]); everything else operates on an
//! already-fetched record list, mirroring what the dashboard computes
//! client-side. Handlers accept no filter parameters by contract, so the
//! filter here applies only to in-memory lists.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::record::RecordWithRelations;

/// Label used when a record's category id no longer matches a category row.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Label used when a record's user projection is missing.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Record count for one category, sorted descending in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecordCount {
    /// Category id the records point at, whether or not the row exists.
    pub category_id: Uuid,
    /// Category display name, or [`UNKNOWN_CATEGORY`].
    pub category_name: String,
    /// Number of records in the group.
    pub record_count: i64,
}

/// Record count for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecordCount {
    /// User id the records point at.
    pub user_id: Uuid,
    /// User display name, or [`UNKNOWN_USER`].
    pub user_name: String,
    /// Number of records in the group.
    pub record_count: i64,
}

/// Record count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecordCount {
    /// UTC calendar day of `dateRecord`.
    pub day: NaiveDate,
    /// Number of records logged on that day.
    pub record_count: i64,
}

/// Optional date-range and user filter applied before grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Inclusive lower bound on `dateRecord`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `dateRecord`.
    pub to: Option<DateTime<Utc>>,
    /// Restrict to records owned by this user.
    pub user_id: Option<Uuid>,
}

impl ReportFilter {
    fn matches(&self, record: &RecordWithRelations) -> bool {
        let date = record.record.date_record;
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        if self
            .user_id
            .is_some_and(|user| record.record.user_id != user)
        {
            return false;
        }
        true
    }
}

/// Join grouped record counts with category names, labelling ids that match
/// no category as [`UNKNOWN_CATEGORY`], sorted by count descending.
///
/// `counts` comes from the store's group-by; `names` from the category
/// lookup. Categories with zero records never appear because the group-by
/// only yields ids that occur in records.
pub fn summarise_by_category(
    counts: Vec<(Uuid, i64)>,
    names: Vec<(Uuid, String)>,
) -> Vec<CategoryRecordCount> {
    let name_map: HashMap<Uuid, String> = names.into_iter().collect();
    let mut summary: Vec<CategoryRecordCount> = counts
        .into_iter()
        .map(|(category_id, record_count)| CategoryRecordCount {
            category_id,
            category_name: name_map
                .get(&category_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned()),
            record_count,
        })
        .collect();
    summary.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    summary
}

/// Group a fetched record list by category, descending by count.
pub fn count_by_category(
    records: &[RecordWithRelations],
    filter: &ReportFilter,
) -> Vec<CategoryRecordCount> {
    let mut groups: HashMap<Uuid, (String, i64)> = HashMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        let name = record
            .category
            .as_ref()
            .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str());
        let entry = groups
            .entry(record.record.category_id)
            .or_insert_with(|| (name.to_owned(), 0));
        entry.1 += 1;
    }
    let mut summary: Vec<CategoryRecordCount> = groups
        .into_iter()
        .map(|(category_id, (category_name, record_count))| CategoryRecordCount {
            category_id,
            category_name,
            record_count,
        })
        .collect();
    summary.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    summary
}

/// Group a fetched record list by owning user, descending by count.
pub fn count_by_user(
    records: &[RecordWithRelations],
    filter: &ReportFilter,
) -> Vec<UserRecordCount> {
    let mut groups: HashMap<Uuid, (String, i64)> = HashMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        let name = record
            .user
            .as_ref()
            .map_or(UNKNOWN_USER, |u| u.name.as_str());
        let entry = groups
            .entry(record.record.user_id)
            .or_insert_with(|| (name.to_owned(), 0));
        entry.1 += 1;
    }
    let mut summary: Vec<UserRecordCount> = groups
        .into_iter()
        .map(|(user_id, (user_name, record_count))| UserRecordCount {
            user_id,
            user_name,
            record_count,
        })
        .collect();
    summary.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.user_name.cmp(&b.user_name))
    });
    summary
}

/// Group a fetched record list by UTC calendar day, ascending by day.
pub fn count_by_day(records: &[RecordWithRelations], filter: &ReportFilter) -> Vec<DayRecordCount> {
    let mut groups: HashMap<NaiveDate, i64> = HashMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        *groups.entry(record.record.date_record.date_naive()).or_insert(0) += 1;
    }
    let mut summary: Vec<DayRecordCount> = groups
        .into_iter()
        .map(|(day, record_count)| DayRecordCount { day, record_count })
        .collect();
    summary.sort_by_key(|entry| entry.day);
    summary
}
