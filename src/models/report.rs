//! Report data model.
//!
//! A report is a two-column table made of groups. Each group starts with a
//! blank separator row, followed by a header row carrying the group label
//! and continuation rows with an empty label.

use serde::{Deserialize, Serialize};

/// Column headers for an alphabetic catalog.
pub const ALPHABETIC_COLUMNS: (&str, &str) = ("A - Z", "Movie");

/// Column headers for a series catalog.
pub const SERIES_COLUMNS: (&str, &str) = ("Series", "Movie");

/// A single report row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Group label (only set on the first row of a group).
    pub label: String,
    /// Item value.
    pub value: String,
}

impl ReportRow {
    /// Blank separator row.
    pub fn separator() -> Self {
        Self::default()
    }

    /// Whether this is a blank separator row.
    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

/// A group of items as laid out in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub label: String,
    pub items: Vec<String>,
}

/// Ordered two-column report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Column headers (label column, value column).
    pub columns: (String, String),
    /// Rows in output order.
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Create an empty report with the given column headers.
    pub fn new(columns: (&str, &str)) -> Self {
        Self {
            columns: (columns.0.to_string(), columns.1.to_string()),
            rows: Vec::new(),
        }
    }

    /// Append a group. Empty groups produce no rows at all.
    pub fn push_group<I, S>(&mut self, label: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items = items.into_iter();
        let Some(first) = items.next() else {
            return;
        };

        self.rows.push(ReportRow::separator());
        self.rows.push(ReportRow {
            label: label.to_string(),
            value: first.into(),
        });
        self.rows.extend(items.map(|item| ReportRow {
            label: String::new(),
            value: item.into(),
        }));
    }

    /// Rebuild the groups from the row layout.
    pub fn groups(&self) -> Vec<ReportGroup> {
        let mut groups: Vec<ReportGroup> = Vec::new();
        for row in &self.rows {
            if row.is_separator() {
                continue;
            }
            if !row.label.is_empty() {
                groups.push(ReportGroup {
                    label: row.label.clone(),
                    items: vec![row.value.clone()],
                });
            } else if let Some(group) = groups.last_mut() {
                group.items.push(row.value.clone());
            }
        }
        groups
    }

    /// Number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_separator()).count()
    }

    /// Whether the report has no groups.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert into a generic table for rendering.
    pub fn to_table(&self) -> Table {
        Table {
            headers: vec![self.columns.0.clone(), self.columns.1.clone()],
            rows: self
                .rows
                .iter()
                .map(|r| vec![r.label.clone(), r.value.clone()])
                .collect(),
        }
    }
}

/// Generic table handed to the output sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_group_layout() {
        let mut report = Report::new(ALPHABETIC_COLUMNS);
        report.push_group("A", ["Alien", "Amelie"]);

        assert_eq!(report.rows.len(), 3);
        assert!(report.rows[0].is_separator());
        assert_eq!(report.rows[1].label, "A");
        assert_eq!(report.rows[1].value, "Alien");
        assert_eq!(report.rows[2].label, "");
        assert_eq!(report.rows[2].value, "Amelie");
    }

    #[test]
    fn test_empty_group_has_no_rows() {
        let mut report = Report::new(SERIES_COLUMNS);
        report.push_group("Empty", Vec::<String>::new());
        assert!(report.is_empty());
        assert!(report.groups().is_empty());
    }

    #[test]
    fn test_groups_round_trip() {
        let mut report = Report::new(SERIES_COLUMNS);
        report.push_group("Breaking Bad", ["Pilot", "Cat's in the Bag"]);
        report.push_group("Uncategorized", ["Heat"]);

        let groups = report.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Breaking Bad");
        assert_eq!(groups[0].items, vec!["Pilot", "Cat's in the Bag"]);
        assert_eq!(groups[1].items, vec!["Heat"]);
        assert_eq!(report.item_count(), 3);
    }

    #[test]
    fn test_to_table() {
        let mut report = Report::new(ALPHABETIC_COLUMNS);
        report.push_group("F", ["Fargo"]);
        let table = report.to_table();
        assert_eq!(table.headers, vec!["A - Z", "Movie"]);
        assert_eq!(table.rows, vec![vec!["", ""], vec!["F", "Fargo"]]);
    }
}
