//! Google Sheets `values.get` client.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use workshops_core::SheetRow;
use workshops_sync::HostError;

use super::{agent, read_json, send};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4";

/// Unreserved URL characters stay literal; everything else is escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Read-only handle on the Sheets API.
pub struct SheetsClient {
    agent: ureq::Agent,
    token: String,
}

impl SheetsClient {
    pub fn new(token: impl Into<String>) -> Self {
        SheetsClient {
            agent: agent(),
            token: token.into(),
        }
    }

    /// Fetch `range` and convert it to rows keyed by the header row.
    pub fn fetch_rows(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<SheetRow>, HostError> {
        let url = values_url(spreadsheet_id, range);
        tracing::debug!("GET {url}");
        let response = send(
            self.agent
                .get(&url)
                .set("Authorization", &format!("Bearer {}", self.token))
                .call(),
        )?;
        let body: ValueRange = read_json(response)?;
        Ok(SheetRow::from_grid(body.values))
    }
}

fn values_url(spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{SHEETS_API}/spreadsheets/{}/values/{}",
        utf8_percent_encode(spreadsheet_id, SEGMENT),
        utf8_percent_encode(range, SEGMENT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_escaped_in_url() {
        assert_eq!(
            values_url("abc_DEF-1", "Ark1!A:AC"),
            "https://sheets.googleapis.com/v4/spreadsheets/abc_DEF-1/values/Ark1%21A%3AAC"
        );
    }

    #[test]
    fn missing_values_field_is_empty_sheet() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"Ark1!A1:AC1000","majorDimension":"ROWS"}"#)
            .unwrap();
        assert!(SheetRow::from_grid(body.values).is_empty());
    }

    #[test]
    fn ragged_values_become_padded_rows() {
        let body: ValueRange = serde_json::from_str(
            r#"{"values":[["acronym","date","book chair github username"],["WS","08/12/2022"]]}"#,
        )
        .unwrap();
        let rows = SheetRow::from_grid(body.values);
        assert_eq!(rows[0].get("acronym"), "WS");
        assert_eq!(rows[0].get("book chair github username"), "");
    }
}
