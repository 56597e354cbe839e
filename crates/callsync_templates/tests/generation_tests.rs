//! End-to-end generation tests over the demo dataset and the shipped
//! templates.

use std::sync::Arc;

use callsync_knowledge::{demo_store, CompanyDirectory, InsightsSource, TranscriptAnalyzer};
use callsync_templates::{
    builtin_catalog, ContentGenerator, CustomValues, ResolutionContext, TemplateError,
    TemplateValue, TemplateVariable, VariableSource,
};

fn demo_generator() -> ContentGenerator {
    let store = Arc::new(demo_store());
    let analyzer = Arc::new(TranscriptAnalyzer::new(store.clone()));
    ContentGenerator::new(store, analyzer, Arc::new(builtin_catalog()))
}

#[tokio::test]
async fn test_value_proposition_for_acme() {
    let generator = demo_generator();
    let content = generator.generate_by_id("template-1", "comp-1").await.unwrap();

    assert_eq!(content.title, "Value Proposition for Acme Corporation");
    assert!(content.body.contains("<h1>Value Proposition for Acme Corporation</h1>"));

    // Pain points come from the analyzed knowledge segments.
    assert!(content.body.contains("<li><strong>We're looking to modernize"));

    // Next steps come from the insights record.
    assert!(content.body.contains("<p>Schedule follow-up call in 5 days</p>"));

    // Every marker the template declares has been consumed.
    assert!(!content.body.contains("{{company.name}}"));
    assert!(!content.body.contains("{{#each"));
    assert!(!content.body.contains("{{/each}}"));
}

#[tokio::test]
async fn test_roi_case_renders_metric_rows() {
    let generator = demo_generator();
    let content = generator.generate_by_id("template-2", "comp-2").await.unwrap();

    assert_eq!(content.title, "ROI Business Case for Global Solutions, Inc");

    // Three preset improvement areas, one table row each.
    assert_eq!(content.body.matches("<tr>").count(), 4); // header + 3 rows
    assert!(!content.body.contains("{{name}}"));
    assert!(!content.body.contains("{{impact}}"));
}

#[tokio::test]
async fn test_handoff_renders_stakeholder_rows() {
    let generator = demo_generator();
    let content = generator.generate_by_id("template-3", "comp-3").await.unwrap();

    assert_eq!(content.title, "Customer Success Handoff for Innovate Tech");
    assert!(content.body.contains("<p><strong>Industry:</strong> Healthcare</p>"));
    assert!(content.body.contains("<p><strong>Size:</strong> 500-1000 employees</p>"));
    assert!(content.body.contains("<p><strong>Website:</strong> innovatetech.com</p>"));

    // Stakeholder and risk rows come from the presets.
    assert!(content.body.contains("@company.com)"));
    assert!(!content.body.contains("{{mitigation}}"));
}

#[tokio::test]
async fn test_rendered_output_is_stable_when_rerendered() {
    let generator = demo_generator();
    let catalog = builtin_catalog();
    let template = catalog.get("template-1").unwrap();

    let content = generator.generate(template, "comp-1").await.unwrap();
    let again = callsync_templates::expand(&content.body, &content.variables).unwrap();
    assert_eq!(content.body, again);
}

#[tokio::test]
async fn test_unknown_company_produces_no_content() {
    let generator = demo_generator();
    let err = generator.generate_by_id("template-1", "comp-404").await.unwrap_err();
    assert!(matches!(err, TemplateError::CompanyNotFound(id) if id == "comp-404"));
}

#[tokio::test]
async fn test_dangling_knowledge_base_reference_aborts() {
    // A company whose knowledge base id points nowhere resolves the
    // company but has no insights.
    struct Dangling;

    impl CompanyDirectory for Dangling {
        fn company(&self, id: &str) -> Option<callsync_knowledge::Company> {
            Some(callsync_knowledge::Company {
                id: id.to_string(),
                name: "Orphan Co".to_string(),
                crm_id: "crm-900".to_string(),
                industry: "Retail".to_string(),
                website: "orphan.example".to_string(),
                size: "50-100 employees".to_string(),
                knowledge_base_id: "kb-900".to_string(),
            })
        }
    }

    struct NoInsights;

    impl InsightsSource for NoInsights {
        fn insights_for(&self, _company_id: &str) -> Option<callsync_knowledge::InsightsRecord> {
            None
        }
    }

    let generator = ContentGenerator::new(
        Arc::new(Dangling),
        Arc::new(NoInsights),
        Arc::new(builtin_catalog()),
    );
    let err = generator.generate_by_id("template-1", "comp-900").await.unwrap_err();
    assert!(matches!(err, TemplateError::KnowledgeBaseNotFound(_)));
}

#[tokio::test]
async fn test_defaults_fill_in_for_unreferenced_data() {
    // comp-2 has a single transcript segment, so the analyzer still
    // produces insights; custom variables with no preset entry fall back
    // to their declared defaults.
    let generator = demo_generator();
    let catalog = builtin_catalog();

    let mut template = catalog.get("template-1").unwrap().clone();
    template.variables.push(TemplateVariable::new(
        "closingLine",
        VariableSource::Custom,
        "closing",
        "Thank you for your time.",
    ));
    template.body.push_str("<p>{{closingLine}}</p>");

    let content = generator.generate(&template, "comp-2").await.unwrap();
    assert!(content.body.contains("<p>Thank you for your time.</p>"));
    assert_eq!(
        content.variables.get("closingLine"),
        Some(&TemplateValue::text("Thank you for your time."))
    );
}

#[tokio::test]
async fn test_variables_table_covers_every_declaration() {
    let generator = demo_generator();
    let catalog = builtin_catalog();

    for template in catalog.list() {
        let content = generator.generate(template, "comp-1").await.unwrap();
        assert_eq!(content.variables.len(), template.variables.len(), "{}", template.id);
        for variable in &template.variables {
            assert!(
                content.variables.get(&variable.name).is_some(),
                "{} missing {}",
                template.id,
                variable.name
            );
        }
    }
}

#[test]
fn test_resolution_without_any_roots_uses_defaults() {
    let catalog = builtin_catalog();
    let template = catalog.get("template-2").unwrap();

    let resolved = ResolutionContext::new().resolve_all(&template.variables);
    assert_eq!(resolved.scalar("company.name").unwrap().to_string(), "Client");
    assert_eq!(resolved.scalar("generatedDate").unwrap().to_string(), "today");
    assert_eq!(resolved.list("financialMetrics").map(|l| l.len()), Some(0));
}

#[tokio::test]
async fn test_generation_with_caller_table_only() {
    // Callers can bypass the presets entirely with a fixed table.
    let store = Arc::new(demo_store());
    let analyzer = Arc::new(TranscriptAnalyzer::new(store.clone()));
    let table = CustomValues::new()
        .with("generatedDate", "June 1, 2023")
        .with("proposedSolution", "A two-phase rollout.")
        .with("outcomes", TemplateValue::texts(["Faster onboarding", "Lower churn"]));

    let generator = ContentGenerator::new(store, analyzer, Arc::new(builtin_catalog()))
        .with_provider(Arc::new(table));
    let content = generator.generate_by_id("template-1", "comp-1").await.unwrap();

    assert!(content.body.contains("Generated on June 1, 2023"));
    assert!(content.body.contains("<p>A two-phase rollout.</p>"));
    assert!(content.body.contains("<li><strong>Faster onboarding</strong></li>"));
    assert!(content.body.contains("<li><strong>Lower churn</strong></li>"));
}
