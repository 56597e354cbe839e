//! Simulated Salesforce connector.
//!
//! Mirrors the shape of a real integration (API key check, per-mapping
//! field walk, minted record id) without any network traffic, so sync
//! flows can run end to end in development.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use callsync_knowledge::InsightsRecord;

use crate::config::{CrmConfig, CrmKind};
use crate::connector::{synced_fields, CallSummary, CrmConnector, SyncOutcome};
use crate::error::{CrmError, CrmResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct SalesforceConnector {
    latency: Option<Duration>,
}

impl SalesforceConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long per push, approximating a round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl CrmConnector for SalesforceConnector {
    fn kind(&self) -> CrmKind {
        CrmKind::Salesforce
    }

    async fn push_call(
        &self,
        config: &CrmConfig,
        call: &CallSummary,
        insights: Option<&InsightsRecord>,
    ) -> CrmResult<SyncOutcome> {
        if !config.has_api_key() {
            return Err(CrmError::MissingApiKey(CrmKind::Salesforce));
        }

        debug!(recording = %call.recording_id, "Pushing call to Salesforce");
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = SyncOutcome {
            record_id: format!("sf-{}", Utc::now().timestamp_millis()),
            synced_fields: synced_fields(config, call, insights),
        };
        info!(
            record_id = %outcome.record_id,
            fields = outcome.synced_fields.len(),
            "Salesforce sync complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call() -> CallSummary {
        CallSummary {
            recording_id: "rec-1".to_string(),
            title: "Quarterly review".to_string(),
            date: Utc::now(),
            duration_secs: 2400,
            transcript_text: None,
            contact_id: None,
            deal_id: None,
        }
    }

    #[tokio::test]
    async fn test_push_requires_api_key() {
        let connector = SalesforceConnector::new();
        let config = CrmConfig::default_for(CrmKind::Salesforce);

        let err = connector.push_call(&config, &call(), None).await.unwrap_err();
        assert!(matches!(err, CrmError::MissingApiKey(CrmKind::Salesforce)));
        assert_eq!(err.to_string(), "No Salesforce API key provided");
    }

    #[tokio::test]
    async fn test_push_mints_prefixed_record_id() {
        let connector = SalesforceConnector::new();
        let config = CrmConfig::default_for(CrmKind::Salesforce).with_api_key("sk-live");

        let outcome = connector.push_call(&config, &call(), None).await.unwrap();
        assert!(outcome.record_id.starts_with("sf-"));
        assert_eq!(outcome.synced_fields, vec!["Subject", "Call_Duration__c"]);
    }
}
