//! Simulated HubSpot connector.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use callsync_knowledge::InsightsRecord;

use crate::config::{CrmConfig, CrmKind};
use crate::connector::{synced_fields, CallSummary, CrmConnector, SyncOutcome};
use crate::error::{CrmError, CrmResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct HubspotConnector {
    latency: Option<Duration>,
}

impl HubspotConnector {
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
impl CrmConnector for HubspotConnector {
    fn kind(&self) -> CrmKind {
        CrmKind::Hubspot
    }

    async fn push_call(
        &self,
        config: &CrmConfig,
        call: &CallSummary,
        insights: Option<&InsightsRecord>,
    ) -> CrmResult<SyncOutcome> {
        if !config.has_api_key() {
            return Err(CrmError::MissingApiKey(CrmKind::Hubspot));
        }

        debug!(recording = %call.recording_id, "Pushing call to HubSpot");
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = SyncOutcome {
            record_id: format!("hs-{}", Utc::now().timestamp_millis()),
            synced_fields: synced_fields(config, call, insights),
        };
        info!(
            record_id = %outcome.record_id,
            fields = outcome.synced_fields.len(),
            "HubSpot sync complete"
        );
        Ok(outcome)
    }
}
