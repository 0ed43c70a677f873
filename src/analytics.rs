//! Frequency rankings and posting trends over a catalog.
//!
//! Everything here is a pure function of the catalog. Counting keeps the
//! order in which keys are first seen and the descending sort is stable, so
//! ties always come out in catalog order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::models::catalog::Catalog;
use crate::models::rank::{DayCount, RankEntry, RankTable};

pub const DEFAULT_TOP_TITLES: usize = 5;
pub const DEFAULT_TOP_LOCATIONS: usize = 5;
pub const DEFAULT_TOP_SKILLS: usize = 10;

pub fn rank_by_title(catalog: &Catalog, top_n: usize) -> RankTable {
    rank(catalog.iter().map(|job| job.title.as_str()), top_n)
}

pub fn rank_by_location(catalog: &Catalog, top_n: usize) -> RankTable {
    rank(catalog.iter().map(|job| job.location.as_str()), top_n)
}

/// Ranks comma-separated skill tokens. Duplicates within one listing count.
pub fn rank_by_skills(catalog: &Catalog, top_n: usize) -> RankTable {
    rank(
        catalog
            .iter()
            .filter_map(|job| job.skills.as_deref())
            .flat_map(skill_tokens),
        top_n,
    )
}

/// Postings per calendar day, ascending. Listings without a parsable date
/// are left out.
pub fn postings_over_time(catalog: &Catalog) -> Vec<DayCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut undated = 0usize;
    for job in catalog {
        match parse_posted_date(&job.date_posted) {
            Some(day) => *days.entry(day).or_insert(0) += 1,
            None => undated += 1,
        }
    }

    if undated > 0 {
        tracing::debug!("{undated} listings have no usable date_posted");
    }

    days.into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

/// Trimmed, non-empty pieces of a comma-separated skills field.
pub fn skill_tokens(skills: &str) -> impl Iterator<Item = &str> {
    skills.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Calendar day of an ISO-like timestamp. RFC 3339 values keep the day in
/// their own offset. Returns `None` for the "N/A" sentinel and anything else
/// that does not parse.
pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn rank<'a>(keys: impl Iterator<Item = &'a str>, top_n: usize) -> RankTable {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut entries: Vec<RankEntry> = counts
        .into_iter()
        .map(|(key, count)| RankEntry {
            key: key.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    RankTable::from_sorted(entries)
}

#[derive(Debug, Clone, Copy)]
pub struct ReportLimits {
    pub titles: usize,
    pub locations: usize,
    pub skills: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            titles: DEFAULT_TOP_TITLES,
            locations: DEFAULT_TOP_LOCATIONS,
            skills: DEFAULT_TOP_SKILLS,
        }
    }
}

/// All aggregates for one catalog, handed to whatever renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    pub total: usize,
    pub top_titles: RankTable,
    pub top_locations: RankTable,
    pub top_skills: RankTable,
    pub postings_over_time: Vec<DayCount>,
    /// Listings left out of `postings_over_time`.
    pub undated: usize,
}

impl TrendReport {
    pub fn build(catalog: &Catalog, limits: ReportLimits) -> Self {
        let postings_over_time = postings_over_time(catalog);
        let dated: usize = postings_over_time.iter().map(|d| d.count).sum();
        Self {
            total: catalog.len(),
            top_titles: rank_by_title(catalog, limits.titles),
            top_locations: rank_by_location(catalog, limits.locations),
            top_skills: rank_by_skills(catalog, limits.skills),
            undated: catalog.len() - dated,
            postings_over_time,
        }
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, heading: &str, table: &RankTable) -> fmt::Result {
    writeln!(f, "\n{heading}:")?;
    if table.is_empty() {
        return writeln!(f, "  (none)");
    }
    let width = table.entries().iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in table.entries() {
        writeln!(f, "  {:<width$}  {}", entry.key, entry.count)?;
    }
    Ok(())
}

impl fmt::Display for TrendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total jobs: {}", self.total)?;
        write_table(f, &format!("Top {} Job Titles", self.top_titles.len()), &self.top_titles)?;
        write_table(f, &format!("Top {} Locations", self.top_locations.len()), &self.top_locations)?;
        write_table(f, &format!("Top {} Skills", self.top_skills.len()), &self.top_skills)?;

        writeln!(f, "\nPostings over time:")?;
        if self.postings_over_time.is_empty() {
            writeln!(f, "  (no valid dates)")?;
        }
        for day in &self.postings_over_time {
            writeln!(f, "  {}  {}", day.day, day.count)?;
        }
        if self.undated > 0 {
            writeln!(f, "  ({} listings without a usable date)", self.undated)?;
        }
        Ok(())
    }
}
