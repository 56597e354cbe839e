//! # callsync_recordings
//!
//! Recording and transcript domain for CallSync.
//!
//! This crate owns the call-recording data model (recordings, their
//! lifecycle states, transcripts) and the single-blob JSON store the
//! embedding application persists them in.

pub mod error;
pub mod models;
pub mod store;

pub use error::{RecordingError, RecordingResult};
pub use models::{
    JoinCallRequest, MeetingType, Recording, RecordingStatus, Transcript, TranscriptSegment,
};
pub use store::RecordingStore;
