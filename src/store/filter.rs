//! Listing filters for the console's System / Domain / SourceType selectors.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::ConfigRecord;

/// Label of the selectors' "no filter" option. The option submits an empty
/// value, so a column value spelled "All" is still selectable.
pub const ALL: &str = "All";

/// Equality filters over the three identifying columns.
///
/// `None` matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Treat an empty value as no filter.
fn selection(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl RecordFilter {
    /// Build a filter from raw selector values.
    pub fn new(system: Option<&str>, domain: Option<&str>, source_type: Option<&str>) -> Self {
        Self {
            system: system.map(str::to_string),
            domain: domain.map(str::to_string),
            source_type: source_type.map(str::to_string),
        }
        .normalized()
    }

    /// Collapse empty selections to `None`.
    pub fn normalized(self) -> Self {
        Self {
            system: selection(self.system.as_deref()).map(str::to_string),
            domain: selection(self.domain.as_deref()).map(str::to_string),
            source_type: selection(self.source_type.as_deref()).map(str::to_string),
        }
    }

    pub fn matches(&self, record: &ConfigRecord) -> bool {
        fn eq(want: &Option<String>, have: &str) -> bool {
            want.as_deref().map_or(true, |w| w == have)
        }
        eq(&self.system, &record.system)
            && eq(&self.domain, &record.domain)
            && eq(&self.source_type, &record.source_type)
    }

    /// Records that pass the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [ConfigRecord]) -> Vec<&'a ConfigRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct values of one column, sorted, for a selector.
pub fn distinct_values<'a, F>(records: &'a [ConfigRecord], column: F) -> Vec<String>
where
    F: Fn(&'a ConfigRecord) -> &'a str,
{
    records
        .iter()
        .map(column)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
