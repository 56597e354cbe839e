//! Read-only repository over companies, knowledge bases and segments.

use tracing::debug;

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::models::{Company, KnowledgeBase, KnowledgeSegment, SourceType};

/// Lookup seam for company records.
///
/// Content generation depends on this trait rather than on a concrete
/// store so tests can substitute a fixed directory.
pub trait CompanyDirectory: Send + Sync {
    /// The company with the given id, if known.
    fn company(&self, id: &str) -> Option<Company>;
}

/// In-memory store of companies and their knowledge.
///
/// The store is read-only once constructed; construction validates that
/// knowledge bases and segments reference records that exist.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    companies: Vec<Company>,
    knowledge_bases: Vec<KnowledgeBase>,
    segments: Vec<KnowledgeSegment>,
}

impl KnowledgeStore {
    /// Builds a store from the given records, validating cross references.
    pub fn new(
        companies: Vec<Company>,
        knowledge_bases: Vec<KnowledgeBase>,
        segments: Vec<KnowledgeSegment>,
    ) -> KnowledgeResult<Self> {
        for (i, company) in companies.iter().enumerate() {
            if companies[..i].iter().any(|c| c.id == company.id) {
                return Err(KnowledgeError::DuplicateCompany(company.id.clone()));
            }
        }
        for kb in &knowledge_bases {
            if !companies.iter().any(|c| c.id == kb.company_id) {
                return Err(KnowledgeError::UnknownCompany {
                    knowledge_base: kb.id.clone(),
                    company: kb.company_id.clone(),
                });
            }
        }
        for segment in &segments {
            if !knowledge_bases.iter().any(|kb| kb.id == segment.knowledge_base_id) {
                return Err(KnowledgeError::UnknownKnowledgeBase {
                    segment: segment.id.clone(),
                    knowledge_base: segment.knowledge_base_id.clone(),
                });
            }
        }

        debug!(
            companies = companies.len(),
            knowledge_bases = knowledge_bases.len(),
            segments = segments.len(),
            "Built knowledge store"
        );

        Ok(Self { companies, knowledge_bases, segments })
    }

    /// All companies, in insertion order.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// The knowledge base with the given id.
    pub fn knowledge_base(&self, id: &str) -> Option<&KnowledgeBase> {
        self.knowledge_bases.iter().find(|kb| kb.id == id)
    }

    /// The knowledge base belonging to a company.
    pub fn knowledge_base_for(&self, company_id: &str) -> Option<&KnowledgeBase> {
        self.knowledge_bases.iter().find(|kb| kb.company_id == company_id)
    }

    /// All segments of a knowledge base, in insertion order.
    pub fn segments_for(&self, knowledge_base_id: &str) -> Vec<&KnowledgeSegment> {
        self.segments
            .iter()
            .filter(|s| s.knowledge_base_id == knowledge_base_id)
            .collect()
    }

    /// Segments of a knowledge base captured from one source type.
    pub fn segments_by_source(
        &self,
        knowledge_base_id: &str,
        source: SourceType,
    ) -> Vec<&KnowledgeSegment> {
        self.segments
            .iter()
            .filter(|s| s.knowledge_base_id == knowledge_base_id && s.source_type == source)
            .collect()
    }
}

impl CompanyDirectory for KnowledgeStore {
    fn company(&self, id: &str) -> Option<Company> {
        self.companies.iter().find(|c| c.id == id).cloned()
    }
}
