//! # callsync_knowledge
//!
//! Company knowledge domain for CallSync.
//!
//! This crate models companies and the knowledge collected about them:
//!
//! - Domain records: [`Company`], [`KnowledgeBase`], [`KnowledgeSegment`]
//! - [`KnowledgeStore`], a read-only repository with validated cross references
//! - The collaborator traits content generation depends on
//!   ([`CompanyDirectory`], [`InsightsSource`])
//! - [`TranscriptAnalyzer`], a deterministic stand-in for the production
//!   analysis service
//! - Demo fixtures mirroring the CallSync demo environment
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use callsync_knowledge::{demo_store, InsightsSource, TranscriptAnalyzer};
//!
//! let store = Arc::new(demo_store());
//! let analyzer = TranscriptAnalyzer::new(store.clone());
//!
//! let insights = analyzer.insights_for("comp-1").unwrap();
//! assert!(!insights.key_points.is_empty());
//! ```

pub mod error;
pub mod fixtures;
pub mod insights;
pub mod models;
pub mod repository;

pub use error::{KnowledgeError, KnowledgeResult};
pub use fixtures::{demo_companies, demo_knowledge_bases, demo_segments, demo_store};
pub use insights::{InsightsSource, TranscriptAnalyzer};
pub use models::{
    Company, InsightsRecord, KnowledgeBase, KnowledgeSegment, SourceBreakdown, SourceType,
    TopicMention,
};
pub use repository::{CompanyDirectory, KnowledgeStore};
