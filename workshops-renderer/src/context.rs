//! Template context: serializable rendering payload built from a
//! [`WorkshopRecord`].

use serde::{Deserialize, Serialize};

use workshops_core::config::EventConfig;
use workshops_core::WorkshopRecord;

use crate::error::RenderError;

const ISO_DATE: &str = "%Y-%m-%d";

/// Everything the metadata templates reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataContext {
    pub name: String,
    pub acronym: String,
    pub cover_subtitle: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`.
    pub end_date: String,
    pub location: String,
    /// Proceedings editors; no institution field.
    pub editors: Vec<EditorCtx>,
    /// Organizing-committee members; institution is always present and empty.
    pub members: Vec<MemberCtx>,
    pub role: String,
    pub publisher: String,
    pub volume_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorCtx {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCtx {
    pub first_name: String,
    pub institution: String,
    pub last_name: String,
}

impl MetadataContext {
    /// Build a [`MetadataContext`] from a record and the event constants.
    pub fn from_record(record: &WorkshopRecord, event: &EventConfig) -> Self {
        let editors = record
            .organizer_list
            .iter()
            .map(|o| EditorCtx {
                first_name: o.first_name.clone(),
                last_name: o.last_name.clone(),
            })
            .collect();
        let members = record
            .organizer_list
            .iter()
            .map(|o| MemberCtx {
                first_name: o.first_name.clone(),
                institution: String::new(),
                last_name: o.last_name.clone(),
            })
            .collect();

        MetadataContext {
            name: record.name.clone(),
            acronym: record.acronym.clone(),
            cover_subtitle: event.cover_subtitle.clone(),
            start_date: record.start_date.format(ISO_DATE).to_string(),
            end_date: record.end_date.format(ISO_DATE).to_string(),
            location: event.location.clone(),
            editors,
            members,
            role: "Organizers".to_string(),
            publisher: event.publisher.clone(),
            volume_name: event.volume_name.clone(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
