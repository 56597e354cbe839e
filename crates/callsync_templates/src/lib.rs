//! # callsync_templates
//!
//! Template catalog and content generation for CallSync.
//!
//! A content template couples a body with `{{...}}` markers to the
//! variables the body may reference. Generation resolves each declared
//! variable against the company record, the company's knowledge-base
//! insights or a custom value table, then expands the body:
//!
//! - `{{name}}` substitutes a scalar value
//! - `{{#each name}}...{{/each}}` repeats a section per list item, with
//!   `{{this}}` for scalar items and `{{field}}` for row items
//!
//! Anything that resolves to nothing falls back to the variable's
//! declared default; tokens that match nothing render unchanged.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use callsync_knowledge::{demo_store, TranscriptAnalyzer};
//! use callsync_templates::{builtin_catalog, ContentGenerator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(demo_store());
//! let analyzer = Arc::new(TranscriptAnalyzer::new(store.clone()));
//!
//! let generator = ContentGenerator::new(store, analyzer, Arc::new(builtin_catalog()));
//! let content = generator.generate_by_id("template-1", "comp-1").await.unwrap();
//! assert!(content.body.contains("Value Proposition for Acme Corporation"));
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod expander;
pub mod generator;
pub mod parser;
pub mod presets;
pub mod resolver;
pub mod template;
pub mod value;

pub use catalog::{builtin_catalog, TemplateCatalog};
pub use error::{TemplateError, TemplateResult, TemplateSyntaxError};
pub use expander::expand;
pub use generator::ContentGenerator;
pub use parser::{parse, Op};
pub use presets::{CustomValueProvider, SalesContentPresets};
pub use resolver::ResolutionContext;
pub use template::{
    ContentTemplate, GeneratedContent, TemplateType, TemplateVariable, VariableSource,
};
pub use value::{CustomValues, ListItem, ResolvedVariables, Scalar, TemplateValue};
