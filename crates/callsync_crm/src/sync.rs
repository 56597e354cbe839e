//! Dispatches call syncs to the configured CRM backend.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use callsync_knowledge::InsightsRecord;

use crate::config::{CrmConfig, CrmKind};
use crate::connector::{CallSummary, CrmConnector, SyncOutcome};
use crate::error::{CrmError, CrmResult};
use crate::hubspot::HubspotConnector;
use crate::salesforce::SalesforceConnector;

/// Result of probing a CRM connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionCheck {
    pub success: bool,
    pub message: String,
}

/// Routes call syncs to the connector matching the config's CRM kind.
///
/// When note sync is on and the call carries a transcript, insights are
/// extracted from it and pushed along with the call record.
pub struct CrmSyncService {
    connectors: Vec<Arc<dyn CrmConnector>>,
}

impl CrmSyncService {
    /// A service with the Salesforce and HubSpot connectors registered.
    pub fn new() -> Self {
        Self::empty()
            .with_connector(Arc::new(SalesforceConnector::new()))
            .with_connector(Arc::new(HubspotConnector::new()))
    }

    /// A service with no connectors registered.
    pub fn empty() -> Self {
        Self {
            connectors: Vec::new(),
        }
    }

    /// Register a connector, replacing any existing one of the same kind.
    pub fn with_connector(mut self, connector: Arc<dyn CrmConnector>) -> Self {
        self.connectors.retain(|c| c.kind() != connector.kind());
        self.connectors.push(connector);
        self
    }

    fn connector_for(&self, kind: CrmKind) -> Option<&Arc<dyn CrmConnector>> {
        self.connectors.iter().find(|c| c.kind() == kind)
    }

    /// Push one call to the configured CRM.
    pub async fn sync(&self, config: &CrmConfig, call: &CallSummary) -> CrmResult<SyncOutcome> {
        if !config.enabled {
            return Err(CrmError::SyncDisabled);
        }

        let insights = match (&call.transcript_text, config.sync_notes) {
            (Some(text), true) => {
                debug!(recording = %call.recording_id, "Extracting insights for CRM notes");
                Some(InsightsRecord::from_transcript(text))
            }
            _ => None,
        };

        let connector = self
            .connector_for(config.kind)
            .ok_or(CrmError::UnsupportedCrm(config.kind))?;

        let outcome = connector.push_call(config, call, insights.as_ref()).await?;
        info!(
            crm = %config.kind,
            recording = %call.recording_id,
            record_id = %outcome.record_id,
            "Call synced to CRM"
        );
        Ok(outcome)
    }

    /// Probe the configured connection without pushing anything.
    pub async fn test_connection(&self, config: &CrmConfig) -> ConnectionCheck {
        if !config.has_api_key() {
            return ConnectionCheck {
                success: false,
                message: "API key is required".to_string(),
            };
        }

        ConnectionCheck {
            success: true,
            message: format!("Successfully connected to {}", config.kind),
        }
    }
}

impl Default for CrmSyncService {
    fn default() -> Self {
        Self::new()
    }
}
