//! Data models for recordings and transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RecordingError, RecordingResult};

/// Minimum title length accepted when scheduling a call.
const MIN_TITLE_LEN: usize = 3;

/// Meeting platform a call takes place on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingType {
    Zoom,
    GoogleMeet,
    MicrosoftTeams,
    Webex,
    Other,
}

impl MeetingType {
    /// Detect the platform from a meeting URL.
    pub fn detect(url: &str) -> Self {
        if url.contains("zoom.us") {
            MeetingType::Zoom
        } else if url.contains("meet.google.com") {
            MeetingType::GoogleMeet
        } else if url.contains("teams.microsoft.com") {
            MeetingType::MicrosoftTeams
        } else if url.contains("webex.com") {
            MeetingType::Webex
        } else {
            MeetingType::Other
        }
    }
}

/// Lifecycle state of a recording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordingStatus {
    #[default]
    Scheduled,
    Recording,
    Processing,
    Completed,
    Failed,
}

/// A recorded or scheduled call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    pub title: String,
    pub meeting_type: MeetingType,
    pub date: DateTime<Utc>,
    /// Call length in seconds; zero until the call has taken place.
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub transcript_available: bool,
    pub status: RecordingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
}

/// A single speaker turn within a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    pub id: String,
    pub speaker: String,
    pub text: String,
    /// Offset from the start of the call, in seconds.
    pub start_time: f64,
    pub end_time: f64,
}

/// Full transcript of a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub recording_id: String,
    pub segments: Vec<TranscriptSegment>,
    pub full_text: String,
    pub speakers: Vec<String>,
}

/// Parameters for joining or scheduling a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCallRequest {
    pub meeting_url: String,
    pub meeting_type: MeetingType,
    pub title: String,
    pub record_immediately: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<DateTime<Utc>>,
}

impl JoinCallRequest {
    /// Build a request for a meeting URL, detecting the platform.
    pub fn new(meeting_url: impl Into<String>, title: impl Into<String>) -> Self {
        let meeting_url = meeting_url.into();
        let meeting_type = MeetingType::detect(&meeting_url);
        Self {
            meeting_url,
            meeting_type,
            title: title.into(),
            record_immediately: true,
            schedule_time: None,
        }
    }

    /// Schedule the call for a later time instead of recording now.
    pub fn scheduled_for(mut self, time: DateTime<Utc>) -> Self {
        self.schedule_time = Some(time);
        self.record_immediately = false;
        self
    }

    /// Validate the request fields.
    pub fn validate(&self) -> RecordingResult<()> {
        if !self.meeting_url.starts_with("http://") && !self.meeting_url.starts_with("https://") {
            return Err(RecordingError::InvalidMeetingUrl(self.meeting_url.clone()));
        }
        if self.title.trim().len() < MIN_TITLE_LEN {
            return Err(RecordingError::TitleTooShort(self.title.clone()));
        }
        Ok(())
    }

    /// Turn a validated request into a new recording entry.
    pub fn into_recording(self) -> RecordingResult<Recording> {
        self.validate()?;
        let status = if self.record_immediately {
            RecordingStatus::Recording
        } else {
            RecordingStatus::Scheduled
        };
        Ok(Recording {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            meeting_type: self.meeting_type,
            date: self.schedule_time.unwrap_or_else(Utc::now),
            duration_secs: 0,
            thumbnail_url: None,
            transcript_available: false,
            status,
            meeting_url: Some(self.meeting_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_type_detection() {
        assert_eq!(MeetingType::detect("https://zoom.us/j/123456789"), MeetingType::Zoom);
        assert_eq!(
            MeetingType::detect("https://meet.google.com/abc-defg-hij"),
            MeetingType::GoogleMeet
        );
        assert_eq!(
            MeetingType::detect("https://teams.microsoft.com/l/meetup-join/123"),
            MeetingType::MicrosoftTeams
        );
        assert_eq!(MeetingType::detect("https://example.webex.com/meet/x"), MeetingType::Webex);
        assert_eq!(MeetingType::detect("https://example.com/call"), MeetingType::Other);
    }

    #[test]
    fn test_join_request_validation() {
        let request = JoinCallRequest::new("https://zoom.us/j/123", "Weekly Standup");
        assert!(request.validate().is_ok());

        let bad_url = JoinCallRequest::new("zoom.us/j/123", "Weekly Standup");
        assert!(matches!(
            bad_url.validate(),
            Err(RecordingError::InvalidMeetingUrl(_))
        ));

        let bad_title = JoinCallRequest::new("https://zoom.us/j/123", "ab");
        assert!(matches!(
            bad_title.validate(),
            Err(RecordingError::TitleTooShort(_))
        ));
    }

    #[test]
    fn test_into_recording() {
        let recording = JoinCallRequest::new("https://zoom.us/j/123", "Client Onboarding Call")
            .into_recording()
            .unwrap();

        assert_eq!(recording.meeting_type, MeetingType::Zoom);
        assert_eq!(recording.status, RecordingStatus::Recording);
        assert_eq!(recording.duration_secs, 0);
        assert!(!recording.transcript_available);
    }

    #[test]
    fn test_scheduled_request() {
        let time = Utc::now() + chrono::Duration::hours(2);
        let recording = JoinCallRequest::new("https://meet.google.com/abc", "Product Planning")
            .scheduled_for(time)
            .into_recording()
            .unwrap();

        assert_eq!(recording.status, RecordingStatus::Scheduled);
        assert_eq!(recording.date, time);
    }

    #[test]
    fn test_recording_wire_format() {
        let recording = Recording {
            id: "1".to_string(),
            title: "Weekly Team Standup".to_string(),
            meeting_type: MeetingType::Zoom,
            date: "2023-06-15T09:00:00Z".parse().unwrap(),
            duration_secs: 1800,
            thumbnail_url: None,
            transcript_available: true,
            status: RecordingStatus::Completed,
            meeting_url: Some("https://zoom.us/j/123456789".to_string()),
        };

        let json = serde_json::to_value(&recording).unwrap();
        assert_eq!(json["meetingType"], "zoom");
        assert_eq!(json["duration"], 1800);
        assert_eq!(json["status"], "completed");
        assert!(json.get("thumbnailUrl").is_none());
    }

    #[test]
    fn test_transcript_wire_format() {
        let transcript = Transcript {
            recording_id: "1".to_string(),
            segments: vec![
                TranscriptSegment {
                    id: "seg-1".to_string(),
                    speaker: "Sarah Johnson".to_string(),
                    text: "Let's walk through the rollout plan.".to_string(),
                    start_time: 0.0,
                    end_time: 6.5,
                },
                TranscriptSegment {
                    id: "seg-2".to_string(),
                    speaker: "Michael Chen".to_string(),
                    text: "Phase one covers the pilot group.".to_string(),
                    start_time: 6.5,
                    end_time: 14.0,
                },
            ],
            full_text: "Let's walk through the rollout plan. Phase one covers the pilot group."
                .to_string(),
            speakers: vec!["Sarah Johnson".to_string(), "Michael Chen".to_string()],
        };

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json["recordingId"], "1");
        assert_eq!(json["fullText"], transcript.full_text);
        assert_eq!(json["segments"][0]["startTime"], 0.0);
        assert_eq!(json["segments"][1]["endTime"], 14.0);
        assert_eq!(json["speakers"][1], "Michael Chen");

        let parsed: Transcript = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.segments.len(), 2);
        assert_eq!(parsed.segments[0].speaker, "Sarah Johnson");
    }
}
