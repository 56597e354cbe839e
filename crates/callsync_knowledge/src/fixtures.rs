//! Demo dataset: three companies with partially filled knowledge bases.
//!
//! The same records the CallSync demo environment ships; handy as
//! realistic test data for the repository, the analyzer and content
//! generation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{Company, KnowledgeBase, KnowledgeSegment, SourceType};
use crate::repository::KnowledgeStore;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("fixture timestamp")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn metadata(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// The demo companies.
pub fn demo_companies() -> Vec<Company> {
    vec![
        Company {
            id: "comp-1".to_string(),
            name: "Acme Corporation".to_string(),
            crm_id: "crm-001".to_string(),
            industry: "Technology".to_string(),
            website: "acmecorp.com".to_string(),
            size: "1000-5000 employees".to_string(),
            knowledge_base_id: "kb-1".to_string(),
        },
        Company {
            id: "comp-2".to_string(),
            name: "Global Solutions, Inc".to_string(),
            crm_id: "crm-002".to_string(),
            industry: "Finance".to_string(),
            website: "globalsolutions.com".to_string(),
            size: "5000+ employees".to_string(),
            knowledge_base_id: "kb-2".to_string(),
        },
        Company {
            id: "comp-3".to_string(),
            name: "Innovate Tech".to_string(),
            crm_id: "crm-003".to_string(),
            industry: "Healthcare".to_string(),
            website: "innovatetech.com".to_string(),
            size: "500-1000 employees".to_string(),
            knowledge_base_id: "kb-3".to_string(),
        },
    ]
}

/// The demo knowledge bases, one per company.
pub fn demo_knowledge_bases() -> Vec<KnowledgeBase> {
    vec![
        KnowledgeBase {
            id: "kb-1".to_string(),
            company_id: "comp-1".to_string(),
            transcript_ids: strings(&["tr-1", "tr-2", "tr-3", "tr-4"]),
            email_ids: strings(&["em-1", "em-2"]),
            crm_activity_ids: strings(&["crm-act-1", "crm-act-2", "crm-act-3"]),
            web_research_ids: strings(&["web-1"]),
            last_updated: ts("2023-06-15T14:30:00Z"),
        },
        KnowledgeBase {
            id: "kb-2".to_string(),
            company_id: "comp-2".to_string(),
            transcript_ids: strings(&["tr-5", "tr-6"]),
            email_ids: strings(&["em-3", "em-4", "em-5"]),
            crm_activity_ids: strings(&["crm-act-4"]),
            web_research_ids: strings(&["web-2", "web-3"]),
            last_updated: ts("2023-06-12T10:15:00Z"),
        },
        KnowledgeBase {
            id: "kb-3".to_string(),
            company_id: "comp-3".to_string(),
            transcript_ids: strings(&["tr-7"]),
            email_ids: Vec::new(),
            crm_activity_ids: strings(&["crm-act-5", "crm-act-6"]),
            web_research_ids: strings(&["web-4"]),
            last_updated: ts("2023-06-18T09:45:00Z"),
        },
    ]
}

/// The demo knowledge segments.
pub fn demo_segments() -> Vec<KnowledgeSegment> {
    vec![
        KnowledgeSegment {
            id: "seg-1".to_string(),
            knowledge_base_id: "kb-1".to_string(),
            source_type: SourceType::Transcript,
            source_id: "tr-1".to_string(),
            content: "We're looking to modernize our entire infrastructure. Our current pain \
                      points include scalability issues and increasing cloud costs."
                .to_string(),
            date: ts("2023-05-10T14:30:00Z"),
            metadata: metadata(&[("speaker", "John Smith, CTO")]),
        },
        KnowledgeSegment {
            id: "seg-2".to_string(),
            knowledge_base_id: "kb-1".to_string(),
            source_type: SourceType::Transcript,
            source_id: "tr-2".to_string(),
            content: "Security is a top priority for us this year. We need a solution that \
                      complies with GDPR and CCPA regulations."
                .to_string(),
            date: ts("2023-05-20T11:15:00Z"),
            metadata: metadata(&[("speaker", "Sarah Johnson, CISO")]),
        },
        KnowledgeSegment {
            id: "seg-3".to_string(),
            knowledge_base_id: "kb-1".to_string(),
            source_type: SourceType::Email,
            source_id: "em-1".to_string(),
            content: "Following up on our discussion about the implementation timeline. We need \
                      to go live by Q3 to align with our fiscal year planning."
                .to_string(),
            date: ts("2023-05-25T09:30:00Z"),
            metadata: metadata(&[
                ("sender", "john.smith@acmecorp.com"),
                ("subject", "Implementation Timeline"),
            ]),
        },
        KnowledgeSegment {
            id: "seg-4".to_string(),
            knowledge_base_id: "kb-1".to_string(),
            source_type: SourceType::Crm,
            source_id: "crm-act-1".to_string(),
            content: "Budget approved for $1.2M for the digital transformation initiative. \
                      Decision committee includes CTO, CIO, and CFO."
                .to_string(),
            date: ts("2023-06-01T16:45:00Z"),
            metadata: metadata(&[("activityType", "Deal Update"), ("owner", "Account Executive")]),
        },
        KnowledgeSegment {
            id: "seg-5".to_string(),
            knowledge_base_id: "kb-1".to_string(),
            source_type: SourceType::Web,
            source_id: "web-1".to_string(),
            content: "Acme Corporation announced a new strategic partnership with Microsoft to \
                      accelerate their cloud migration strategy."
                .to_string(),
            date: ts("2023-06-10T08:15:00Z"),
            metadata: metadata(&[
                ("source", "TechCrunch"),
                ("url", "https://techcrunch.com/2023/06/10/acme-microsoft-partnership"),
            ]),
        },
        KnowledgeSegment {
            id: "seg-6".to_string(),
            knowledge_base_id: "kb-2".to_string(),
            source_type: SourceType::Transcript,
            source_id: "tr-5".to_string(),
            content: "We're expanding to the European market in Q4 and need to ensure our \
                      financial systems are compliant with EU regulations."
                .to_string(),
            date: ts("2023-06-05T13:20:00Z"),
            metadata: metadata(&[("speaker", "Michael Chang, CFO")]),
        },
        KnowledgeSegment {
            id: "seg-7".to_string(),
            knowledge_base_id: "kb-3".to_string(),
            source_type: SourceType::Transcript,
            source_id: "tr-7".to_string(),
            content: "Our current patient data management is inefficient. We need a solution \
                      that integrates with our EHR system and provides real-time analytics."
                .to_string(),
            date: ts("2023-06-15T10:30:00Z"),
            metadata: metadata(&[("speaker", "Dr. Lisa Patel, Medical Director")]),
        },
    ]
}

/// A store populated with the demo dataset.
pub fn demo_store() -> KnowledgeStore {
    KnowledgeStore::new(demo_companies(), demo_knowledge_bases(), demo_segments())
        .expect("demo dataset is internally consistent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_builds() {
        let store = demo_store();
        assert_eq!(store.companies().len(), 3);
        assert_eq!(store.segments_for("kb-1").len(), 5);
        assert_eq!(store.segments_for("kb-2").len(), 1);
        assert_eq!(store.segments_for("kb-3").len(), 1);
    }

    #[test]
    fn test_breakdown_matches_demo_counts() {
        let store = demo_store();
        let breakdown = store.knowledge_base("kb-1").unwrap().source_breakdown();
        assert_eq!(breakdown.transcripts, 4);
        assert_eq!(breakdown.emails, 2);
        assert_eq!(breakdown.crm_activities, 3);
        assert_eq!(breakdown.web_research, 1);
    }
}
