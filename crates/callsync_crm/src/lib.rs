//! # callsync_crm
//!
//! Pushes recorded calls into a CRM. The crate provides:
//!
//! - **Config**: which CRM, which field mappings, which sync toggles,
//!   persisted as a JSON file
//! - **Connectors**: simulated Salesforce and HubSpot backends behind the
//!   [`CrmConnector`] trait
//! - **Sync service**: routes a call to the configured backend and, when
//!   note sync is on, extracts transcript insights to push with it
//!
//! ## Example
//!
//! ```
//! use callsync_crm::{CallSummary, CrmConfig, CrmKind, CrmSyncService};
//! use chrono::Utc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = CrmSyncService::new();
//! let config = CrmConfig::default_for(CrmKind::Salesforce).with_api_key("sk-demo");
//!
//! let call = CallSummary {
//!     recording_id: "rec-1".to_string(),
//!     title: "Discovery call".to_string(),
//!     date: Utc::now(),
//!     duration_secs: 1800,
//!     transcript_text: Some("We walked through pricing.".to_string()),
//!     contact_id: None,
//!     deal_id: None,
//! };
//!
//! let outcome = service.sync(&config, &call).await.unwrap();
//! assert!(outcome.record_id.starts_with("sf-"));
//! assert!(!outcome.synced_fields.is_empty());
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod hubspot;
pub mod salesforce;
pub mod sync;

pub use config::{default_mappings, CrmConfig, CrmConfigStore, CrmKind, FieldKind, FieldMapping};
pub use connector::{format_insights, CallSummary, CrmConnector, SyncOutcome};
pub use error::{CrmError, CrmResult};
pub use hubspot::HubspotConnector;
pub use salesforce::SalesforceConnector;
pub use sync::{ConnectionCheck, CrmSyncService};
