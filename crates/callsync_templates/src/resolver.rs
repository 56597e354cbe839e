//! Variable resolution against the three lookup roots.
//!
//! A resolution context bundles the company record, the knowledge-base
//! insights and the custom value table for one generation. Resolution
//! never fails: anything missing falls back to the variable's declared
//! default.

use std::collections::BTreeMap;

use tracing::debug;

use callsync_knowledge::{Company, InsightsRecord};

use crate::template::{TemplateVariable, VariableSource};
use crate::value::{CustomValues, ListItem, ResolvedVariables, Scalar, TemplateValue};

/// The lookup roots one generation resolves against.
///
/// Roots may be absent; an absent root simply means every variable
/// declared against it resolves to its default.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    company: Option<Company>,
    insights: Option<InsightsRecord>,
    custom: CustomValues,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    pub fn with_insights(mut self, insights: InsightsRecord) -> Self {
        self.insights = Some(insights);
        self
    }

    pub fn with_custom(mut self, custom: CustomValues) -> Self {
        self.custom = custom;
        self
    }

    /// Resolves one declared variable.
    ///
    /// Company and knowledge-base variables walk `path` through the typed
    /// field accessors of their root; custom variables are looked up by
    /// variable name. Missing roots, fields or entries yield the default.
    pub fn resolve(&self, variable: &TemplateVariable) -> TemplateValue {
        let found = match variable.source {
            VariableSource::Company => {
                self.company.as_ref().and_then(|c| company_field(c, &variable.path))
            }
            VariableSource::KnowledgeBase => {
                self.insights.as_ref().and_then(|i| insights_field(i, &variable.path))
            }
            VariableSource::Custom => self.custom.get(&variable.name).cloned(),
        };
        match found {
            Some(value) => value,
            None => {
                debug!(variable = %variable.name, "Using default value");
                default_value(&variable.default_value)
            }
        }
    }

    /// Resolves every declared variable into a complete table.
    ///
    /// The returned table holds an entry for each declared name, so
    /// expansion never meets a declared token it cannot look up.
    pub fn resolve_all(&self, variables: &[TemplateVariable]) -> ResolvedVariables {
        let mut resolved = ResolvedVariables::new();
        for variable in variables {
            resolved.insert(variable.name.clone(), self.resolve(variable));
        }
        resolved
    }
}

fn single_segment(path: &str) -> Option<&str> {
    let mut parts = path.split('.');
    let leaf = parts.next()?;
    parts.next().is_none().then_some(leaf)
}

fn company_field(company: &Company, path: &str) -> Option<TemplateValue> {
    let field = match single_segment(path)? {
        "id" => &company.id,
        "name" => &company.name,
        "crmId" => &company.crm_id,
        "industry" => &company.industry,
        "website" => &company.website,
        "size" => &company.size,
        _ => return None,
    };
    Some(TemplateValue::text(field))
}

fn insights_field(insights: &InsightsRecord, path: &str) -> Option<TemplateValue> {
    // Insights hang off the knowledge-base root under a single field.
    let rest = path.strip_prefix("insights.")?;
    let value = match single_segment(rest)? {
        "summary" => TemplateValue::text(&insights.summary),
        "keyPoints" => TemplateValue::texts(insights.key_points.iter().cloned()),
        "actionItems" => TemplateValue::texts(insights.action_items.iter().cloned()),
        "sentimentScore" => TemplateValue::float(insights.sentiment_score),
        "nextSteps" => TemplateValue::text(&insights.next_steps),
        "topics" => TemplateValue::List(insights.topics.iter().map(topic_row).collect()),
        _ => return None,
    };
    Some(value)
}

fn topic_row(topic: &callsync_knowledge::TopicMention) -> ListItem {
    ListItem::Map(BTreeMap::from([
        ("name".to_string(), Scalar::Text(topic.name.clone())),
        ("occurrences".to_string(), Scalar::Int(i64::from(topic.occurrences))),
        ("sentiment".to_string(), Scalar::Float(topic.sentiment)),
    ]))
}

/// Defaults declared as `[]` stand for an empty list; everything else is
/// literal text.
fn default_value(declared: &str) -> TemplateValue {
    if declared.trim() == "[]" {
        TemplateValue::List(Vec::new())
    } else {
        TemplateValue::text(declared)
    }
}
