use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{CaptureEvent, DomainError};

/// Port for speech-recognition capture.
///
/// Implementations wrap a platform speech facility in single-shot mode:
/// per session they emit zero or one finalized [`CaptureEvent::Transcript`],
/// or an [`CaptureEvent::Error`], and signal the end of the session with
/// [`CaptureEvent::End`]. At most one capture session is active at a time.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the host environment provides a recognition capability at all.
    /// When false, every start attempt must be reported to the user rather
    /// than silently ignored.
    fn is_available(&self) -> bool;

    /// Start a capture session configured for the given locale tag.
    ///
    /// The locale is fixed for the lifetime of the session; language changes
    /// take effect only on the next capture.
    async fn start(&self, locale_tag: &str) -> Result<(), DomainError>;

    /// Request that the active session stop.
    ///
    /// This is a request, not a guarantee of ordering: a finalized result or
    /// error may still be delivered afterward.
    async fn stop(&self);

    /// Subscribe to capture events.
    fn subscribe(&self) -> broadcast::Receiver<CaptureEvent>;
}
