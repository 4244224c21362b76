use serde::Serialize;

use crate::domain::language::{default_language, SupportedLanguage};

/// Recording half of the session state machine.
///
/// State transitions:
/// - Idle -> Recording (user toggles on; clears transcript/translation/error)
/// - Recording -> Idle (user toggles off, or the recognizer delivers a
///   finalized transcript, an error, or an end-of-session signal)
///
/// Toggling while Recording always means "stop", never a second session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordingStatus {
    /// Ready to capture, no active session.
    Idle,
    /// An active speech-recognition capture session exists.
    Recording,
}

impl RecordingStatus {
    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(self, RecordingStatus::Idle)
    }

    #[must_use]
    pub fn can_stop(&self) -> bool {
        matches!(self, RecordingStatus::Recording)
    }
}

/// Translation half of the session state machine.
///
/// InFlight implies a request for the current transcript has been issued and
/// not yet resolved; at most one request is in flight per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranslationStatus {
    Idle,
    InFlight,
}

/// Events emitted by a speech-recognition capture session, processed in
/// arrival order.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// The finalized transcript of the utterance. Always non-empty per the
    /// recognizer contract.
    Transcript(String),
    /// Recognition failed; carries the recognizer's error code.
    Error(String),
    /// The session ended without a result.
    End,
}

/// The single mutable record driving the UI.
///
/// Owned exclusively by the controller; adapters never retain session data.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub selected_language: &'static SupportedLanguage,
    pub recording: RecordingStatus,
    pub transcript: String,
    pub translation: String,
    pub translation_status: TranslationStatus,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected_language: default_language(),
            recording: RecordingStatus::Idle,
            transcript: String::new(),
            translation: String::new(),
            translation_status: TranslationStatus::Idle,
            last_error: None,
        }
    }

    /// Reset per-utterance state at the start of a new recording attempt.
    /// Clears the transcript, translation, and error regardless of prior
    /// values; the selected language is untouched.
    ///
    /// Also returns the translation flag to Idle: a superseded request's
    /// cleanup deliberately skips a flag it no longer owns, so the new
    /// attempt must take it down here.
    pub fn begin_capture(&mut self) {
        self.transcript.clear();
        self.translation.clear();
        self.last_error = None;
        self.translation_status = TranslationStatus::Idle;
        self.recording = RecordingStatus::Recording;
    }

    /// Immutable snapshot for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            language: self.selected_language.name,
            locale_tag: self.selected_language.locale_tag,
            recording: self.recording,
            transcript: self.transcript.clone(),
            translation: self.translation.clone(),
            translation_status: self.translation_status,
            last_error: self.last_error.clone(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub language: &'static str,
    pub locale_tag: &'static str,
    pub recording: RecordingStatus,
    pub transcript: String,
    pub translation: String,
    pub translation_status: TranslationStatus,
    pub last_error: Option<String>,
}

/// Events published by the controller for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    /// A capture session started.
    RecordingStarted,
    /// The capture session ended, with or without a result.
    RecordingStopped,
    /// A finalized transcript arrived.
    TranscriptReady { text: String },
    /// A translation request was issued.
    TranslationStarted,
    /// A translation resolved successfully.
    TranslationReady { text: String },
    /// Playback of the translation was handed to the synthesizer.
    PlaybackStarted,
    /// A recognition or translation failure was surfaced.
    Error { message: String },
    /// The selected language changed.
    LanguageChanged { locale_tag: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_status_transitions() {
        assert!(RecordingStatus::Idle.can_start());
        assert!(!RecordingStatus::Idle.can_stop());
        assert!(!RecordingStatus::Recording.can_start());
        assert!(RecordingStatus::Recording.can_stop());
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert_eq!(session.recording, RecordingStatus::Idle);
        assert_eq!(session.translation_status, TranslationStatus::Idle);
        assert!(session.transcript.is_empty());
        assert!(session.translation.is_empty());
        assert!(session.last_error.is_none());
        assert_eq!(session.selected_language.locale_tag, "kn-IN");
    }

    #[test]
    fn test_begin_capture_clears_prior_state() {
        let mut session = SessionState::new();
        session.transcript = "ನಮಸ್ಕಾರ".to_string();
        session.translation = "Hello".to_string();
        session.last_error = Some("Speech recognition error: network".to_string());
        session.translation_status = TranslationStatus::InFlight;

        session.begin_capture();

        assert_eq!(session.recording, RecordingStatus::Recording);
        assert!(session.transcript.is_empty());
        assert!(session.translation.is_empty());
        assert!(session.last_error.is_none());
        // A flag left by a superseded request must not survive the new
        // attempt.
        assert_eq!(session.translation_status, TranslationStatus::Idle);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = SessionState::new();
        session.transcript = "ನಮಸ್ಕಾರ".to_string();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.language, "Kannada");
        assert_eq!(snapshot.transcript, "ನಮಸ್ಕಾರ");
        assert_eq!(snapshot.recording, RecordingStatus::Idle);
    }
}
