//! Row → [`WorkshopRecord`] parsing.
//!
//! Only the book-chair cell and the date are validated. Every other cell flows
//! into the record verbatim, blanks included.

use chrono::NaiveDate;

use crate::config::SyncConfig;
use crate::error::RecordError;
use crate::types::{Organizer, RepoFullName, SheetRow, Username, WorkshopRecord};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse one spreadsheet row.
///
/// A blank book-chair cell is reported as [`RecordError::MissingRequiredField`]
/// before anything else is looked at.
pub fn parse(row: &SheetRow, config: &SyncConfig) -> Result<WorkshopRecord, RecordError> {
    let columns = &config.columns;
    let acronym = row.get(&columns.acronym).to_string();

    let book_chairs = parse_usernames(row.get(&columns.book_chair));
    if book_chairs.is_empty() {
        return Err(RecordError::MissingRequiredField {
            acronym,
            field: columns.book_chair.clone(),
        });
    }

    let date = row.get(&columns.date).to_string();
    let (start_date, end_date) = parse_dates(&date, config).ok_or_else(|| {
        RecordError::MalformedDate {
            acronym: acronym.clone(),
            value: date.clone(),
        }
    })?;

    let organizers = row.get(&columns.organizers).to_string();
    let organizer_list = parse_organizers(&organizers);

    Ok(WorkshopRecord {
        repository: RepoFullName::new(&config.organization, &acronym),
        name: row.get(&columns.name).to_string(),
        website: row.get(&columns.website).to_string(),
        acronym,
        organizers,
        date,
        book_chairs,
        organizer_list,
        start_date,
        end_date,
    })
}

/// Split `"A B, C D and E F"` into names, each split at its first space.
pub fn parse_organizers(raw: &str) -> Vec<Organizer> {
    raw.replace(" and ", ", ")
        .split(", ")
        .map(|name| {
            let (first, last) = name.split_once(' ').unwrap_or((name, ""));
            Organizer {
                first_name: first.to_string(),
                last_name: last.to_string(),
            }
        })
        .collect()
}

/// Comma- and/or whitespace-separated account names, in input order.
pub fn parse_usernames(raw: &str) -> Vec<Username> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(Username::from)
        .collect()
}

fn parse_dates(raw: &str, config: &SyncConfig) -> Option<(NaiveDate, NaiveDate)> {
    if raw == config.event.two_day_literal {
        return Some((config.event.two_day_start, config.event.two_day_end));
    }
    if !has_four_digit_year(raw) {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    Some((date, date))
}

/// chrono's `%Y` also takes short and signed years; only `YYYY` is valid here.
fn has_four_digit_year(raw: &str) -> bool {
    raw.rsplit_once('/')
        .is_some_and(|(_, year)| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
