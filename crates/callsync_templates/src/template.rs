//! Content template definitions.
//!
//! Templates are configuration-time values: a body with `{{...}}` markers
//! plus the declared variables the body may reference. Serialized field
//! names follow the CallSync catalog format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::ResolvedVariables;

/// Where a variable's value is looked up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VariableSource {
    /// The company record.
    Company,
    /// The company's knowledge-base insights.
    KnowledgeBase,
    /// The caller-supplied custom value table.
    Custom,
}

/// A declared template variable.
///
/// `name` is the substitution key used in the body; dots group related
/// names and carry no structural meaning. `path` addresses a field inside
/// the source record and is ignored for custom-sourced variables, which
/// are looked up by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub name: String,
    pub source: VariableSource,
    pub path: String,
    pub default_value: String,
}

impl TemplateVariable {
    pub fn new(
        name: impl Into<String>,
        source: VariableSource,
        path: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), source, path: path.into(), default_value: default_value.into() }
    }
}

/// The kind of document a template produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Proposal,
    #[serde(rename = "roi")]
    RoiAnalysis,
    Handoff,
    ExecutiveSummary,
    ImplementationPlan,
}

/// A content template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    /// Body markup with `{{...}}` markers.
    #[serde(rename = "template")]
    pub body: String,
    /// Declared variables, in declaration order.
    pub variables: Vec<TemplateVariable>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentTemplate {
    /// The declared variable with the given name.
    pub fn variable(&self, name: &str) -> Option<&TemplateVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// One generated document.
///
/// Owned by the caller; nothing is persisted on its behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub id: String,
    pub template_id: String,
    pub company_id: String,
    pub knowledge_base_id: String,
    pub title: String,
    /// The fully expanded body.
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// The variable table the body was expanded against.
    pub variables: ResolvedVariables,
}
