//! Recording store persistence.
//!
//! The web client kept all recording state in a single local-storage
//! blob; this store is the same idea as a single JSON file on disk.
//! The whole list is loaded at open and written back on `save`; the
//! data set is a handful of entries, not a database.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RecordingError, RecordingResult};
use crate::models::{Recording, RecordingStatus};

/// File-backed store for the recording list.
#[derive(Debug)]
pub struct RecordingStore {
    path: PathBuf,
    recordings: Vec<Recording>,
}

impl RecordingStore {
    /// Open a store at the given path, loading any existing blob.
    ///
    /// A missing file yields an empty store; a file that exists but
    /// cannot be parsed is reported as a corrupt store rather than
    /// silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> RecordingResult<Self> {
        let path = path.into();

        let recordings = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| RecordingError::CorruptStore {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            debug!("No recording store at {:?}, starting empty", path);
            Vec::new()
        };

        info!("Opened recording store with {} entries", recordings.len());
        Ok(Self { path, recordings })
    }

    /// Write the current state back to disk.
    pub fn save(&self) -> RecordingResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.recordings)?;
        fs::write(&self.path, content)?;
        debug!("Saved {} recordings to {:?}", self.recordings.len(), self.path);
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a recording to the store.
    pub fn add(&mut self, recording: Recording) {
        self.recordings.push(recording);
    }

    /// Look up a recording by id.
    pub fn get(&self, id: &str) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.id == id)
    }

    /// Update the status of a recording.
    pub fn update_status(&mut self, id: &str, status: RecordingStatus) -> RecordingResult<()> {
        let recording = self
            .recordings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecordingError::NotFound(id.to_string()))?;
        recording.status = status;
        Ok(())
    }

    /// Mark a recording's transcript as available.
    pub fn mark_transcribed(&mut self, id: &str) -> RecordingResult<()> {
        let recording = self
            .recordings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecordingError::NotFound(id.to_string()))?;
        recording.transcript_available = true;
        Ok(())
    }

    /// All recordings, in insertion order.
    pub fn list(&self) -> &[Recording] {
        &self.recordings
    }

    /// Recordings that have not happened yet.
    pub fn upcoming(&self) -> Vec<&Recording> {
        self.recordings
            .iter()
            .filter(|r| r.status == RecordingStatus::Scheduled)
            .collect()
    }

    /// The most recent non-scheduled recordings, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Recording> {
        let mut past: Vec<&Recording> = self
            .recordings
            .iter()
            .filter(|r| r.status != RecordingStatus::Scheduled)
            .collect();
        past.sort_by(|a, b| b.date.cmp(&a.date));
        past.truncate(limit);
        past
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}
