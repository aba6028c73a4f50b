//! Domain types for workshop coordination data.
//!
//! Records are built once per spreadsheet row and never persisted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Full `owner/name` identifier of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoFullName(pub String);

impl RepoFullName {
    /// `<owner>/<name>`.
    pub fn new(owner: &str, name: &str) -> Self {
        Self(format!("{owner}/{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoFullName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoFullName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A hosting-platform account name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(pub String);

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet rows
// ---------------------------------------------------------------------------

/// One data row of the coordination sheet, as ordered `(header, cell)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    cells: Vec<(String, String)>,
}

impl SheetRow {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Convert a raw value grid into rows. The first row is the header; short
    /// rows are padded with empty cells and cells past the header are dropped.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Vec<SheetRow> {
        let mut rows = grid.into_iter();
        let Some(header) = rows.next() else {
            return vec![];
        };
        rows.map(|mut values| {
            values.resize(header.len(), String::new());
            SheetRow {
                cells: header.iter().cloned().zip(values).collect(),
            }
        })
        .collect()
    }

    /// Cell for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One name from the organizers cell, split at the first space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub first_name: String,
    pub last_name: String,
}

/// A parsed workshop row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopRecord {
    pub acronym: String,
    pub name: String,
    pub website: String,
    /// Raw organizers cell.
    pub organizers: String,
    /// Raw date cell.
    pub date: String,
    pub book_chairs: Vec<Username>,
    pub organizer_list: Vec<Organizer>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Target repository, `<organization>/<acronym>`.
    pub repository: RepoFullName,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn newtype_display() {
        assert_eq!(RepoFullName::new("org", "ws").to_string(), "org/ws");
        assert_eq!(Username::from("asilva").to_string(), "asilva");
    }

    #[test]
    fn grid_uses_first_row_as_header() {
        let rows = SheetRow::from_grid(grid(&[
            &["acronym", "name"],
            &["NLP4Science", "Workshop on NLP for Science"],
        ]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("acronym"), "NLP4Science");
        assert_eq!(rows[0].get("name"), "Workshop on NLP for Science");
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let rows = SheetRow::from_grid(grid(&[&["acronym", "date", "website"], &["WS"]]));
        assert_eq!(rows[0].get("date"), "");
        assert_eq!(rows[0].columns().count(), 3);
    }

    #[test]
    fn cells_past_header_are_dropped() {
        let rows = SheetRow::from_grid(grid(&[&["acronym"], &["WS", "extra"]]));
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["acronym"]);
    }

    #[test]
    fn empty_grid_yields_no_rows() {
        assert!(SheetRow::from_grid(vec![]).is_empty());
        assert!(SheetRow::from_grid(grid(&[&["acronym"]])).is_empty());
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let row = SheetRow::from_pairs([("acronym", "WS")]);
        assert_eq!(row.get("book chair github username"), "");
    }
}
