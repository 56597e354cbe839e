//! Asynchronous content generation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use callsync_knowledge::{CompanyDirectory, InsightsSource};

use crate::catalog::TemplateCatalog;
use crate::error::{TemplateError, TemplateResult};
use crate::expander;
use crate::presets::{CustomValueProvider, SalesContentPresets};
use crate::resolver::ResolutionContext;
use crate::template::{ContentTemplate, GeneratedContent};
use crate::value::CustomValues;

/// Generates documents from templates for a company.
///
/// All collaborators are supplied at construction; the generator holds
/// no global state and never persists what it produces. Generation is
/// all-or-nothing: on any error the caller gets no partial output.
pub struct ContentGenerator {
    directory: Arc<dyn CompanyDirectory>,
    insights: Arc<dyn InsightsSource>,
    catalog: Arc<TemplateCatalog>,
    provider: Arc<dyn CustomValueProvider>,
    latency: Option<Duration>,
}

impl ContentGenerator {
    /// Creates a generator with the shipped sales-content presets and no
    /// simulated latency.
    pub fn new(
        directory: Arc<dyn CompanyDirectory>,
        insights: Arc<dyn InsightsSource>,
        catalog: Arc<TemplateCatalog>,
    ) -> Self {
        Self {
            directory,
            insights,
            catalog,
            provider: Arc::new(SalesContentPresets::new()),
            latency: None,
        }
    }

    /// Replaces the custom-value provider.
    pub fn with_provider(mut self, provider: Arc<dyn CustomValueProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Adds a simulated generation delay, as the hosted service shows.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The catalog this generator serves templates from.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Generates content from a catalog template.
    pub async fn generate_by_id(
        &self,
        template_id: &str,
        company_id: &str,
    ) -> TemplateResult<GeneratedContent> {
        let template = self
            .catalog
            .get(template_id)
            .ok_or_else(|| TemplateError::TemplateNotFound(template_id.to_string()))?;
        self.generate(template, company_id).await
    }

    /// Generates content from a template for a company.
    pub async fn generate(
        &self,
        template: &ContentTemplate,
        company_id: &str,
    ) -> TemplateResult<GeneratedContent> {
        self.generate_with_values(template, company_id, CustomValues::new()).await
    }

    /// Generates content with caller-supplied custom values overlaid on
    /// the provider's table.
    pub async fn generate_with_values(
        &self,
        template: &ContentTemplate,
        company_id: &str,
        overrides: CustomValues,
    ) -> TemplateResult<GeneratedContent> {
        debug!(template = %template.id, company_id, "Generating content");

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let company = self
            .directory
            .company(company_id)
            .ok_or_else(|| TemplateError::CompanyNotFound(company_id.to_string()))?;
        let insights = self
            .insights
            .insights_for(company_id)
            .ok_or_else(|| TemplateError::KnowledgeBaseNotFound(company_id.to_string()))?;

        let mut custom = self.provider.custom_values(template, &company);
        custom.merge(overrides);

        let context = ResolutionContext::new()
            .with_company(company.clone())
            .with_insights(insights)
            .with_custom(custom);
        let variables = context.resolve_all(&template.variables);
        let body = expander::expand(&template.body, &variables)?;

        let content = GeneratedContent {
            id: Uuid::new_v4().to_string(),
            template_id: template.id.clone(),
            company_id: company.id.clone(),
            knowledge_base_id: company.knowledge_base_id.clone(),
            title: format!("{} for {}", template.name, company.name),
            body,
            created_at: Utc::now(),
            variables,
        };
        info!(
            content_id = %content.id,
            template = %template.id,
            company = %company.name,
            "Generated content"
        );
        Ok(content)
    }
}
