//! The connector seam between the sync service and concrete CRMs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use callsync_knowledge::InsightsRecord;
use callsync_recordings::Recording;

use crate::config::{CrmConfig, CrmKind};
use crate::error::CrmResult;

/// The call-side payload a connector pushes to a CRM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSummary {
    pub recording_id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
}

impl CallSummary {
    /// Builds the payload for a recording; transcript and CRM links are
    /// attached separately.
    pub fn from_recording(recording: &Recording) -> Self {
        Self {
            recording_id: recording.id.clone(),
            title: recording.title.clone(),
            date: recording.date,
            duration_secs: recording.duration_secs,
            transcript_text: None,
            contact_id: None,
            deal_id: None,
        }
    }

    pub fn with_transcript(mut self, text: impl Into<String>) -> Self {
        self.transcript_text = Some(text.into());
        self
    }

    pub fn with_contact(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_deal(mut self, deal_id: impl Into<String>) -> Self {
        self.deal_id = Some(deal_id.into());
        self
    }
}

/// What a connector reports back after a successful push.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    /// Id of the record minted on the CRM side.
    pub record_id: String,
    /// CRM field names that actually carried data.
    pub synced_fields: Vec<String>,
}

/// Flattens an insights record into the field names mappings address.
///
/// List-valued insights are joined into bullet text so they land in a
/// single CRM text field.
pub fn format_insights(insights: &InsightsRecord) -> HashMap<String, String> {
    HashMap::from([
        ("summary".to_string(), insights.summary.clone()),
        (
            "action_items".to_string(),
            insights.action_items.join("\n• "),
        ),
        ("key_points".to_string(), insights.key_points.join("\n• ")),
    ])
}

/// Walks the configured mappings and returns the CRM-side names of those
/// whose source field has a value for this call.
pub(crate) fn synced_fields(
    config: &CrmConfig,
    call: &CallSummary,
    insights: Option<&InsightsRecord>,
) -> Vec<String> {
    let formatted = insights.map(format_insights);

    let mut fields = Vec::new();
    for mapping in &config.mappings {
        let has_value = match mapping.source_field.as_str() {
            "title" | "date" | "duration" => true,
            "transcript" => call.transcript_text.is_some(),
            other => formatted
                .as_ref()
                .map_or(false, |values| values.contains_key(other)),
        };

        if has_value {
            fields.push(mapping.crm_field.clone());
        }
    }

    fields
}

/// One CRM backend the sync service can push calls to.
#[async_trait]
pub trait CrmConnector: Send + Sync {
    /// Which CRM this connector talks to.
    fn kind(&self) -> CrmKind;

    /// Push one call record, returning the minted record id and the
    /// fields that carried data.
    async fn push_call(
        &self,
        config: &CrmConfig,
        call: &CallSummary,
        insights: Option<&InsightsRecord>,
    ) -> CrmResult<SyncOutcome>;
}
