//! Deterministic insights collaborators.
//!
//! Production CallSync derives insights with an analysis service; the
//! implementations here synthesize the same fixed shape from stored
//! segments (or a raw transcript) without randomness, so generation and
//! sync tests stay reproducible.

use std::sync::Arc;

use tracing::debug;

use crate::models::{InsightsRecord, SourceType, TopicMention};
use crate::repository::KnowledgeStore;

/// Lookup seam for company insights.
///
/// Content generation depends on this trait so tests can substitute a
/// fixed record or an absent one.
pub trait InsightsSource: Send + Sync {
    /// Synthesized insights for a company, if it has a knowledge base.
    fn insights_for(&self, company_id: &str) -> Option<InsightsRecord>;
}

/// Keywords the analyzer counts topic mentions from, with the baseline
/// sentiment attached to each topic.
const TOPIC_KEYWORDS: &[(&str, f64)] = &[
    ("pricing", 0.3),
    ("implementation", 0.7),
    ("timeline", 0.5),
    ("security", 0.4),
    ("compliance", 0.6),
    ("integration", 0.7),
    ("migration", 0.5),
    ("budget", 0.4),
];

const SUMMARY_EXCERPT_CHARS: usize = 50;
const MAX_KEY_POINTS: usize = 4;
const MAX_TOPICS: usize = 5;

/// Derives an [`InsightsRecord`] from the segments stored for a company.
///
/// The summary quotes the oldest transcript segment, key points are the
/// leading segment contents, and topics are keyword counts over all
/// segment text. Repeat calls over the same store yield the same record.
#[derive(Debug, Clone)]
pub struct TranscriptAnalyzer {
    store: Arc<KnowledgeStore>,
}

impl TranscriptAnalyzer {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }
}

impl InsightsSource for TranscriptAnalyzer {
    fn insights_for(&self, company_id: &str) -> Option<InsightsRecord> {
        let kb = self.store.knowledge_base_for(company_id)?;
        let segments = self.store.segments_for(&kb.id);
        debug!(
            company_id,
            knowledge_base = %kb.id,
            segments = segments.len(),
            "Analyzing knowledge segments"
        );

        let mut transcripts = self.store.segments_by_source(&kb.id, SourceType::Transcript);
        transcripts.sort_by_key(|s| s.date);
        let summary = match transcripts.first() {
            Some(segment) => {
                let lead: String = segment.content.chars().take(SUMMARY_EXCERPT_CHARS).collect();
                format!("This was a discussion about {lead}...")
            }
            None => "No conversations captured yet.".to_string(),
        };

        let key_points: Vec<String> = segments
            .iter()
            .take(MAX_KEY_POINTS)
            .map(|s| s.content.clone())
            .collect();

        let text: String = segments
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(InsightsRecord {
            summary,
            key_points,
            action_items: vec![
                "Send pricing document by EOD".to_string(),
                "Schedule technical team for next demo".to_string(),
                "Prepare custom implementation plan".to_string(),
            ],
            sentiment_score: 0.65,
            next_steps: "Schedule follow-up call in 5 days".to_string(),
            topics: count_topics(&text),
        })
    }
}

/// Counts case-insensitive keyword occurrences, keeping the most-mentioned
/// topics. Ties order alphabetically so output is stable.
fn count_topics(text: &str) -> Vec<TopicMention> {
    let haystack = text.to_lowercase();
    let mut topics: Vec<TopicMention> = TOPIC_KEYWORDS
        .iter()
        .filter_map(|(keyword, sentiment)| {
            let occurrences = haystack.matches(keyword).count() as u32;
            (occurrences > 0).then(|| TopicMention {
                name: (*keyword).to_string(),
                occurrences,
                sentiment: *sentiment,
            })
        })
        .collect();
    topics.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.name.cmp(&b.name)));
    topics.truncate(MAX_TOPICS);
    topics
}

impl InsightsRecord {
    /// Derives insights from a single raw transcript.
    ///
    /// Used by CRM sync when note syncing is enabled and the call carries
    /// transcript text. The summary quotes the transcript's opening; the
    /// remaining fields are the fixed shape the analysis service returns
    /// for an unenriched call.
    pub fn from_transcript(transcript: &str) -> Self {
        let lead: String = transcript.chars().take(SUMMARY_EXCERPT_CHARS).collect();
        Self {
            summary: format!("This was a discussion about {lead}..."),
            key_points: vec![
                "Customer expressed interest in premium tier".to_string(),
                "Price point was discussed".to_string(),
                "Follow-up demo scheduled for next week".to_string(),
            ],
            action_items: vec![
                "Send pricing document by EOD".to_string(),
                "Schedule technical team for next demo".to_string(),
                "Prepare custom implementation plan".to_string(),
            ],
            sentiment_score: 0.65,
            next_steps: "Schedule follow-up call in 5 days".to_string(),
            topics: vec![
                TopicMention { name: "pricing".to_string(), occurrences: 12, sentiment: 0.3 },
                TopicMention { name: "implementation".to_string(), occurrences: 8, sentiment: 0.7 },
                TopicMention { name: "timeline".to_string(), occurrences: 5, sentiment: 0.5 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_store;

    fn analyzer() -> TranscriptAnalyzer {
        TranscriptAnalyzer::new(Arc::new(demo_store()))
    }

    #[test]
    fn test_summary_quotes_oldest_transcript() {
        let insights = analyzer().insights_for("comp-1").unwrap();
        assert!(
            insights.summary.starts_with("This was a discussion about We're looking to modernize"),
            "unexpected summary: {}",
            insights.summary
        );
        assert!(insights.summary.ends_with("..."));
    }

    #[test]
    fn test_key_points_come_from_segments() {
        let insights = analyzer().insights_for("comp-1").unwrap();
        assert_eq!(insights.key_points.len(), 4);
        assert!(insights.key_points[1].starts_with("Security is a top priority"));
    }

    #[test]
    fn test_topics_are_counted_and_ordered() {
        let insights = analyzer().insights_for("comp-1").unwrap();
        let names: Vec<&str> = insights.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["budget", "implementation", "migration", "security", "timeline"]);
        assert!(insights.topics.iter().all(|t| t.occurrences == 1));
    }

    #[test]
    fn test_unknown_company_has_no_insights() {
        assert!(analyzer().insights_for("comp-999").is_none());
    }

    #[test]
    fn test_from_transcript_is_deterministic() {
        let transcript = "Discussed pricing options and the rollout timeline for next quarter.";
        let first = InsightsRecord::from_transcript(transcript);
        let second = InsightsRecord::from_transcript(transcript);
        assert_eq!(first, second);
        assert!(first.summary.contains("Discussed pricing options"));
        assert_eq!(first.topics[0].name, "pricing");
        assert_eq!(first.topics[0].occurrences, 12);
        assert!((first.sentiment_score - 0.65).abs() < f64::EPSILON);
    }
}
