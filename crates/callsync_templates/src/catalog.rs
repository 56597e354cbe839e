//! Template catalog: construction, validation and loading.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};
use crate::parser;
use crate::template::{ContentTemplate, TemplateType, TemplateVariable, VariableSource};

/// Read-only, ordered collection of content templates.
///
/// Every template is validated on the way in: ids are non-empty and
/// unique, variable names are well formed and unique per template, and
/// the body parses.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<ContentTemplate>,
}

impl TemplateCatalog {
    /// Builds a catalog from the given templates.
    pub fn new(templates: Vec<ContentTemplate>) -> TemplateResult<Self> {
        let name_pattern = variable_name_pattern();
        for (i, template) in templates.iter().enumerate() {
            validate(template, &name_pattern)?;
            if templates[..i].iter().any(|t| t.id == template.id) {
                return Err(TemplateError::InvalidTemplate {
                    id: template.id.clone(),
                    message: "duplicate template id".to_string(),
                });
            }
        }
        Ok(Self { templates })
    }

    /// Parses a catalog from a YAML list of templates.
    pub fn from_yaml(content: &str) -> TemplateResult<Self> {
        let templates: Vec<ContentTemplate> = serde_yaml::from_str(content)?;
        Self::new(templates)
    }

    /// Loads a catalog from a directory of `*.yaml`/`*.yml` files, one
    /// template per file, in file-name order. Files that fail to load
    /// are logged and skipped.
    pub fn load_dir(path: impl AsRef<Path>) -> TemplateResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Template directory does not exist: {:?}", path);
            return Ok(Self::default());
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_yaml(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();

        let mut templates = Vec::new();
        for file in files {
            match load_template_file(&file) {
                Ok(template) => {
                    info!("Loaded template: {} ({})", template.name, template.id);
                    templates.push(template);
                }
                Err(e) => {
                    warn!("Failed to load template from {:?}: {}", file, e);
                }
            }
        }

        Self::new(templates)
    }

    /// The template with the given id.
    pub fn get(&self, id: &str) -> Option<&ContentTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates, in declaration order.
    pub fn list(&self) -> &[ContentTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_template_file(path: &Path) -> TemplateResult<ContentTemplate> {
    debug!("Loading template from {:?}", path);
    let content = fs::read_to_string(path)?;
    let template: ContentTemplate = serde_yaml::from_str(&content)?;
    Ok(template)
}

fn variable_name_pattern() -> Regex {
    // Letters first, then letters/digits/underscores/dots.
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap()
}

fn validate(template: &ContentTemplate, name_pattern: &Regex) -> TemplateResult<()> {
    let invalid = |message: String| TemplateError::InvalidTemplate {
        id: template.id.clone(),
        message,
    };

    if template.id.trim().is_empty() {
        return Err(invalid("empty template id".to_string()));
    }
    if template.name.trim().is_empty() {
        return Err(invalid("empty template name".to_string()));
    }

    for (i, variable) in template.variables.iter().enumerate() {
        if !name_pattern.is_match(&variable.name) {
            return Err(invalid(format!("invalid variable name: {:?}", variable.name)));
        }
        if template.variables[..i].iter().any(|v| v.name == variable.name) {
            return Err(invalid(format!("duplicate variable: {}", variable.name)));
        }
    }

    if let Err(e) = parser::parse(&template.body) {
        return Err(invalid(format!("template body: {e}")));
    }

    Ok(())
}

const VALUE_PROPOSITION_BODY: &str = r#"<h1>Value Proposition for {{company.name}}</h1>
<p class="text-gray-500">Generated on {{generatedDate}}</p>
<hr>
<h2>Understanding Your Challenges</h2>
<p>Based on our conversations with {{company.name}}, we understand that you're facing the following challenges:</p>
<ul>
{{#each painPoints}}  <li><strong>{{this}}</strong></li>
{{/each}}</ul>
<h2>Our Proposed Solution</h2>
<p>{{proposedSolution}}</p>
<h2>Expected Outcomes</h2>
<ul>
{{#each outcomes}}  <li><strong>{{this}}</strong></li>
{{/each}}</ul>
<h2>Next Steps</h2>
<p>{{nextSteps}}</p>
"#;

const ROI_BUSINESS_CASE_BODY: &str = r#"<h1>ROI Business Case for {{company.name}}</h1>
<p class="text-gray-500">Generated on {{generatedDate}}</p>
<hr>
<h2>Executive Summary</h2>
<p>{{executiveSummary}}</p>
<h2>Current Situation</h2>
<p>{{currentSituation}}</p>
<h2>Financial Impact</h2>
<table class="w-full border-collapse">
  <thead>
    <tr>
      <th class="border p-2">Metric</th>
      <th class="border p-2">Before</th>
      <th class="border p-2">After</th>
      <th class="border p-2">Impact</th>
    </tr>
  </thead>
  <tbody>
{{#each financialMetrics}}    <tr>
      <td class="border p-2">{{name}}</td>
      <td class="border p-2">{{before}}</td>
      <td class="border p-2">{{after}}</td>
      <td class="border p-2">{{impact}}</td>
    </tr>
{{/each}}  </tbody>
</table>
<h2>Expected ROI</h2>
<p>{{expectedRoi}}</p>
<h2>Implementation Timeline</h2>
<p>{{implementationTimeline}}</p>
"#;

const HANDOFF_BODY: &str = r#"<h1>Customer Success Handoff: {{company.name}}</h1>
<p class="text-gray-500">Generated on {{generatedDate}}</p>
<hr>
<h2>Account Overview</h2>
<p><strong>Industry:</strong> {{company.industry}}</p>
<p><strong>Size:</strong> {{company.size}}</p>
<p><strong>Website:</strong> {{company.website}}</p>
<h2>Key Stakeholders</h2>
<ul>
{{#each stakeholders}}  <li><strong>{{name}}</strong> - {{title}} ({{email}})</li>
{{/each}}</ul>
<h2>Solution Overview</h2>
<p>{{solutionOverview}}</p>
<h2>Success Criteria</h2>
<ul>
{{#each successCriteria}}  <li>{{this}}</li>
{{/each}}</ul>
<h2>Implementation Plan</h2>
<p>{{implementationPlan}}</p>
<h2>Risk Factors</h2>
<ul>
{{#each riskFactors}}  <li><strong>{{factor}}:</strong> {{mitigation}}</li>
{{/each}}</ul>
"#;

fn builtin(
    id: &str,
    name: &str,
    description: &str,
    template_type: TemplateType,
    body: &str,
    variables: Vec<TemplateVariable>,
    created_at: &str,
    updated_at: &str,
) -> ContentTemplate {
    ContentTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        template_type,
        body: body.to_string(),
        variables,
        created_at: created_at.parse().expect("builtin timestamp"),
        updated_at: updated_at.parse().expect("builtin timestamp"),
    }
}

/// The three templates CallSync ships with.
pub fn builtin_catalog() -> TemplateCatalog {
    use VariableSource::{Company, Custom, KnowledgeBase};

    let var = TemplateVariable::new;
    let templates = vec![
        builtin(
            "template-1",
            "Value Proposition",
            "Generate a tailored value proposition based on client pain points and needs",
            TemplateType::Proposal,
            VALUE_PROPOSITION_BODY,
            vec![
                var("company.name", Company, "name", "Client"),
                var("generatedDate", Custom, "date", "today"),
                var("painPoints", KnowledgeBase, "insights.keyPoints", "[]"),
                var("proposedSolution", Custom, "solution", "Our comprehensive solution..."),
                var("outcomes", Custom, "outcomes", "[]"),
                var(
                    "nextSteps",
                    KnowledgeBase,
                    "insights.nextSteps",
                    "Let's schedule a follow-up call",
                ),
            ],
            "2023-01-15T10:00:00Z",
            "2023-05-20T14:30:00Z",
        ),
        builtin(
            "template-2",
            "ROI Business Case",
            "Generate an ROI analysis and business case for the proposed solution",
            TemplateType::RoiAnalysis,
            ROI_BUSINESS_CASE_BODY,
            vec![
                var("company.name", Company, "name", "Client"),
                var("generatedDate", Custom, "date", "today"),
                var("executiveSummary", Custom, "summary", "This business case outlines..."),
                var(
                    "currentSituation",
                    KnowledgeBase,
                    "insights.summary",
                    "The client is currently...",
                ),
                var("financialMetrics", Custom, "metrics", "[]"),
                var("expectedRoi", Custom, "roi", "Expected ROI of 250% over 3 years"),
                var("implementationTimeline", Custom, "timeline", "12 weeks implementation"),
            ],
            "2023-02-10T11:30:00Z",
            "2023-05-22T09:15:00Z",
        ),
        builtin(
            "template-3",
            "Customer Success Handoff",
            "Generate a comprehensive handoff document from sales to customer success",
            TemplateType::Handoff,
            HANDOFF_BODY,
            vec![
                var("company.name", Company, "name", "Client"),
                var("company.industry", Company, "industry", "Technology"),
                var("company.size", Company, "size", "Enterprise"),
                var("company.website", Company, "website", "client.com"),
                var("generatedDate", Custom, "date", "today"),
                var("stakeholders", Custom, "stakeholders", "[]"),
                var("solutionOverview", Custom, "solution", "The client has purchased..."),
                var("successCriteria", KnowledgeBase, "insights.keyPoints", "[]"),
                var("implementationPlan", Custom, "implementation", "Phase 1: Discovery..."),
                var("riskFactors", Custom, "risks", "[]"),
            ],
            "2023-03-05T13:45:00Z",
            "2023-06-01T15:20:00Z",
        ),
    ];

    TemplateCatalog::new(templates).expect("builtin templates are valid")
}
