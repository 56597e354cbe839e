//! CRM sync configuration.
//!
//! A [`CrmConfig`] tells the sync service which CRM to talk to, which
//! call fields map onto which CRM fields, and which sync features are
//! switched on. Configs are persisted as a single JSON file through
//! [`CrmConfigStore`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CrmResult;

/// Supported CRM backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CrmKind {
    Salesforce,
    Hubspot,
}

impl CrmKind {
    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CrmKind::Salesforce => "Salesforce",
            CrmKind::Hubspot => "HubSpot",
        }
    }
}

impl fmt::Display for CrmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether a mapped CRM field is a standard or a custom one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Standard,
    Custom,
}

/// Maps one call-side field onto one CRM-side field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Field name on the CRM side, e.g. `Subject` or `hs_call_title`.
    pub crm_field: String,
    #[serde(rename = "crmFieldType")]
    pub field_kind: FieldKind,
    /// Field name on the call side, e.g. `title` or `action_items`.
    pub source_field: String,
    #[serde(rename = "isRequired")]
    pub required: bool,
}

impl FieldMapping {
    pub fn new(
        crm_field: impl Into<String>,
        field_kind: FieldKind,
        source_field: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            crm_field: crm_field.into(),
            field_kind,
            source_field: source_field.into(),
            required,
        }
    }
}

/// The stock field mappings shipped for a CRM backend.
pub fn default_mappings(kind: CrmKind) -> Vec<FieldMapping> {
    match kind {
        CrmKind::Salesforce => vec![
            FieldMapping::new("Subject", FieldKind::Standard, "title", true),
            FieldMapping::new("Description", FieldKind::Standard, "summary", false),
            FieldMapping::new("Call_Duration__c", FieldKind::Custom, "duration", false),
            FieldMapping::new("Action_Items__c", FieldKind::Custom, "action_items", false),
            FieldMapping::new("Key_Points__c", FieldKind::Custom, "key_points", false),
        ],
        CrmKind::Hubspot => vec![
            FieldMapping::new("hs_call_title", FieldKind::Standard, "title", true),
            FieldMapping::new("hs_call_body", FieldKind::Standard, "summary", false),
            FieldMapping::new("hs_call_duration", FieldKind::Standard, "duration", false),
            FieldMapping::new("action_items", FieldKind::Custom, "action_items", false),
            FieldMapping::new("key_points", FieldKind::Custom, "key_points", false),
        ],
    }
}

/// Full sync configuration for one CRM connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmConfig {
    #[serde(rename = "crmType")]
    pub kind: CrmKind,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub mappings: Vec<FieldMapping>,
    pub auto_sync_transcripts: bool,
    pub auto_sync_recordings: bool,
    /// When on, insights extracted from the transcript are pushed along
    /// with the call record.
    pub sync_notes: bool,
}

impl CrmConfig {
    /// A fully enabled config with the stock mappings and no API key.
    pub fn default_for(kind: CrmKind) -> Self {
        Self {
            kind,
            enabled: true,
            api_key: None,
            mappings: default_mappings(kind),
            auto_sync_transcripts: true,
            auto_sync_recordings: true,
            sync_notes: true,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// True when an API key is present and non-empty.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |key| !key.is_empty())
    }
}

/// Persists the CRM config as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct CrmConfigStore {
    path: PathBuf,
}

impl CrmConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the config, creating parent directories as needed.
    pub fn save(&self, config: &CrmConfig) -> CrmResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load the stored config, or `None` when nothing has been saved yet.
    pub fn load(&self) -> CrmResult<Option<CrmConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_salesforce_default_mappings() {
        let mappings = default_mappings(CrmKind::Salesforce);

        assert_eq!(mappings.len(), 5);
        assert_eq!(mappings[0].crm_field, "Subject");
        assert!(mappings[0].required);
        assert_eq!(mappings[2].field_kind, FieldKind::Custom);
        assert_eq!(mappings[2].source_field, "duration");
    }

    #[test]
    fn test_hubspot_default_mappings() {
        let mappings = default_mappings(CrmKind::Hubspot);

        assert_eq!(mappings.len(), 5);
        assert_eq!(mappings[0].crm_field, "hs_call_title");
        assert_eq!(mappings[2].field_kind, FieldKind::Standard);
        assert_eq!(mappings[4].source_field, "key_points");
    }

    #[test]
    fn test_config_wire_format() {
        let config = CrmConfig::default_for(CrmKind::Salesforce).with_api_key("sk-test");
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"crmType\":\"salesforce\""));
        assert!(json.contains("\"apiKey\":\"sk-test\""));
        assert!(json.contains("\"autoSyncTranscripts\":true"));
        assert!(json.contains("\"crmFieldType\":\"standard\""));
        assert!(json.contains("\"isRequired\":true"));
    }

    #[test]
    fn test_has_api_key_rejects_empty() {
        let config = CrmConfig::default_for(CrmKind::Hubspot);
        assert!(!config.has_api_key());
        assert!(!config.clone().with_api_key("").has_api_key());
        assert!(config.with_api_key("hs-key").has_api_key());
    }

    #[test]
    fn test_store_roundtrip() {
        let temp = tempdir().unwrap();
        let store = CrmConfigStore::new(temp.path().join("crm").join("config.json"));

        assert!(store.load().unwrap().is_none());

        let config = CrmConfig::default_for(CrmKind::Hubspot).with_api_key("hs-key");
        store.save(&config).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.kind, CrmKind::Hubspot);
        assert_eq!(loaded.api_key.as_deref(), Some("hs-key"));
        assert_eq!(loaded.mappings, default_mappings(CrmKind::Hubspot));
    }

    #[test]
    fn test_store_rejects_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let store = CrmConfigStore::new(&path);
        assert!(store.load().is_err());
    }
}
