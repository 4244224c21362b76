use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::domain::{CaptureEvent, DomainError};
use crate::ports::SpeechRecognizer;

/// Capacity of the capture event channel. Events are tiny and the consumer
/// drains them immediately.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Console-backed recognizer for the demo shell.
///
/// Stands in for a microphone speech service in single-shot mode: `start`
/// arms a capture, and the next line the user types becomes the finalized
/// transcript (an empty line ends the session without a result). One capture
/// per start, matching the single-shot, final-result-only contract.
pub struct ConsoleRecognizer {
    events: broadcast::Sender<CaptureEvent>,
    armed: AtomicBool,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            events,
            armed: AtomicBool::new(false),
        }
    }

    /// Whether a capture session is currently waiting for input.
    pub fn is_capturing(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Deliver one typed line as the captured utterance.
    ///
    /// Disarms first so the session is single-shot even if the consumer is
    /// slow; a line submitted while not armed is ignored.
    pub fn submit_line(&self, line: &str) {
        if !self.armed.swap(false, Ordering::AcqRel) {
            return;
        }
        let text = line.trim();
        let event = if text.is_empty() {
            debug!("Capture ended without a result");
            CaptureEvent::End
        } else {
            CaptureEvent::Transcript(text.to_string())
        };
        let _ = self.events.send(event);
    }
}

impl Default for ConsoleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    async fn start(&self, locale_tag: &str) -> Result<(), DomainError> {
        self.armed.store(true, Ordering::Release);
        info!(locale = locale_tag, "Console capture armed");
        Ok(())
    }

    async fn stop(&self) {
        // Stop is a request; if the capture was still armed the session ends
        // with no result.
        if self.armed.swap(false, Ordering::AcqRel) {
            let _ = self.events.send(CaptureEvent::End);
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_shot_capture() {
        let recognizer = ConsoleRecognizer::new();
        let mut events = recognizer.subscribe();

        recognizer.start("kn-IN").await.unwrap();
        assert!(recognizer.is_capturing());

        recognizer.submit_line("ನಮಸ್ಕಾರ");
        assert!(!recognizer.is_capturing());

        match events.recv().await.unwrap() {
            CaptureEvent::Transcript(text) => assert_eq!(text, "ನಮಸ್ಕಾರ"),
            other => panic!("expected transcript, got {:?}", other),
        }

        // A second line without a new start is dropped.
        recognizer.submit_line("ignored");
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_line_ends_without_result() {
        let recognizer = ConsoleRecognizer::new();
        let mut events = recognizer.subscribe();

        recognizer.start("hi-IN").await.unwrap();
        recognizer.submit_line("   ");

        assert!(matches!(events.recv().await.unwrap(), CaptureEvent::End));
    }

    #[tokio::test]
    async fn test_stop_ends_armed_session() {
        let recognizer = ConsoleRecognizer::new();
        let mut events = recognizer.subscribe();

        recognizer.start("ta-IN").await.unwrap();
        recognizer.stop().await;

        assert!(!recognizer.is_capturing());
        assert!(matches!(events.recv().await.unwrap(), CaptureEvent::End));

        // Stopping when idle emits nothing.
        recognizer.stop().await;
        assert!(events.try_recv().is_err());
    }
}
