//! Data models for companies and their knowledge bases.
//!
//! Field names serialize in the camelCase form the original CallSync
//! data uses; template catalogs address these records by those names.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company tracked in the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub crm_id: String,
    pub industry: String,
    pub website: String,
    pub size: String,
    pub knowledge_base_id: String,
}

/// Accumulated knowledge sources for a single company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub id: String,
    pub company_id: String,
    pub transcript_ids: Vec<String>,
    pub email_ids: Vec<String>,
    pub crm_activity_ids: Vec<String>,
    pub web_research_ids: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl KnowledgeBase {
    /// Per-source tallies over the collected source ids.
    pub fn source_breakdown(&self) -> SourceBreakdown {
        SourceBreakdown {
            transcripts: self.transcript_ids.len(),
            emails: self.email_ids.len(),
            crm_activities: self.crm_activity_ids.len(),
            web_research: self.web_research_ids.len(),
        }
    }
}

/// Where a knowledge segment was captured from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Transcript,
    Email,
    Crm,
    Web,
}

/// A single piece of captured knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSegment {
    pub id: String,
    pub knowledge_base_id: String,
    pub source_type: SourceType,
    pub source_id: String,
    pub content: String,
    pub date: DateTime<Utc>,
    /// Free-form source detail (speaker, sender, activity type, ...).
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Per-source counts for a knowledge base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceBreakdown {
    pub transcripts: usize,
    pub emails: usize,
    pub crm_activities: usize,
    pub web_research: usize,
}

impl SourceBreakdown {
    /// Total number of collected sources.
    pub fn total(&self) -> usize {
        self.transcripts + self.emails + self.crm_activities + self.web_research
    }

    /// Count for one source type.
    pub fn count(&self, source: SourceType) -> usize {
        match source {
            SourceType::Transcript => self.transcripts,
            SourceType::Email => self.emails,
            SourceType::Crm => self.crm_activities,
            SourceType::Web => self.web_research,
        }
    }

    /// Share of one source type in the whole, as a rounded percentage.
    ///
    /// An empty breakdown yields zero rather than dividing by zero.
    pub fn share(&self, source: SourceType) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.count(source) as f64 / total as f64) * 100.0).round() as u32
    }
}

/// A topic surfaced from a company's interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicMention {
    pub name: String,
    pub occurrences: u32,
    pub sentiment: f64,
}

/// Synthetic summary of a company's interactions.
///
/// The fixed shape the insights collaborator returns; a production
/// deployment would fill this from the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRecord {
    pub summary: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<String>,
    pub sentiment_score: f64,
    pub next_steps: String,
    pub topics: Vec<TopicMention>,
}
