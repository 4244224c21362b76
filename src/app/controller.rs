use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{
    by_locale_tag, AppConfig, CaptureEvent, DomainError, RecordingStatus, SessionEvent,
    SessionSnapshot, SessionState, SupportedLanguage, TranslationStatus,
};
use crate::ports::{SpeechRecognizer, SpeechSynthesizer, TranslationApi};

/// Generic user-facing message for a failed translation request.
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed. Please try again.";

const SESSION_EVENT_CAPACITY: usize = 32;

/// Orchestrates the recording -> recognition -> translation -> playback
/// pipeline over injected capability ports.
///
/// The session record is the only shared mutable state; it is written in
/// response to discrete events and read via snapshots. Translation requests
/// carry a generation tag so a response that resolves after a newer recording
/// attempt is discarded instead of overwriting newer state.
pub struct AppController {
    config: AppConfig,
    session: RwLock<SessionState>,
    recognizer: Arc<dyn SpeechRecognizer>,
    translator: Arc<dyn TranslationApi>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    translation_generation: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
}

impl AppController {
    /// Build a controller over the given capability implementations.
    pub fn new(
        config: AppConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        translator: Arc<dyn TranslationApi>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let mut session = SessionState::new();
        if let Some(language) = by_locale_tag(&config.speech.default_language) {
            session.selected_language = language;
        }

        // Missing recognition capability is terminal for the session; surface
        // it once at startup, and again on every recording attempt.
        if !recognizer.is_available() {
            warn!("No speech recognition capability in this environment");
            session.last_error = Some(DomainError::RecognizerUnavailable.to_string());
        }

        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);

        info!(
            language = session.selected_language.name,
            "Pipeline controller initialized"
        );

        Self {
            config,
            session: RwLock::new(session),
            recognizer,
            translator,
            synthesizer,
            translation_generation: AtomicU64::new(0),
            events,
        }
    }

    /// Subscribe to session events for the presentation layer.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current session state.
    pub fn session(&self) -> SessionSnapshot {
        self.session.read().snapshot()
    }

    /// Drive the pipeline from the recognizer's capture events.
    ///
    /// Events are processed sequentially in arrival order.
    pub fn spawn_capture_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let mut events = controller.recognizer.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => controller.handle_capture_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "Capture event stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Toggle the recording state and return the new status.
    ///
    /// While recording, a toggle always means "stop", never a second session.
    /// Failures are surfaced through the session's error slot, not returned;
    /// every failure leaves the session in a stable Idle state.
    pub async fn toggle_recording(&self) -> RecordingStatus {
        let recording = self.session.read().recording;
        match recording {
            RecordingStatus::Recording => {
                // The adapter may still deliver a final result afterward;
                // that result is processed normally.
                self.recognizer.stop().await;
                self.session.write().recording = RecordingStatus::Idle;
                info!("Recording stopped by user");
                self.emit(SessionEvent::RecordingStopped);
                RecordingStatus::Idle
            }
            RecordingStatus::Idle => {
                if !self.recognizer.is_available() {
                    // Re-reported on every attempt, never a silent no-op.
                    let message = DomainError::RecognizerUnavailable.to_string();
                    self.session.write().last_error = Some(message.clone());
                    self.emit(SessionEvent::Error { message });
                    return RecordingStatus::Idle;
                }

                // A new attempt invalidates any translation still in flight
                // for the previous utterance.
                self.translation_generation.fetch_add(1, Ordering::SeqCst);

                let locale_tag = {
                    let mut session = self.session.write();
                    session.begin_capture();
                    session.selected_language.locale_tag
                };
                self.emit(SessionEvent::RecordingStarted);

                if let Err(e) = self.recognizer.start(locale_tag).await {
                    let message = e.to_string();
                    warn!(error = %message, "Failed to start capture");
                    let mut session = self.session.write();
                    session.recording = RecordingStatus::Idle;
                    session.last_error = Some(message.clone());
                    drop(session);
                    self.emit(SessionEvent::Error { message });
                    return RecordingStatus::Idle;
                }

                info!(locale = locale_tag, "Recording started");
                RecordingStatus::Recording
            }
        }
    }

    /// Apply one capture event to the session.
    pub async fn handle_capture_event(self: &Arc<Self>, event: CaptureEvent) {
        match event {
            CaptureEvent::Transcript(text) => {
                let language = {
                    let mut session = self.session.write();
                    session.recording = RecordingStatus::Idle;
                    session.transcript = text.clone();
                    session.selected_language
                };
                info!(language = language.name, "Transcript finalized");
                self.emit(SessionEvent::TranscriptReady { text: text.clone() });

                let generation = self.translation_generation.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::spawn(Arc::clone(self).run_translation(generation, text, language));
            }
            CaptureEvent::Error(code) => {
                warn!(code = %code, "Capture session failed");
                let message = DomainError::Recognition(code).to_string();
                let mut session = self.session.write();
                session.recording = RecordingStatus::Idle;
                session.last_error = Some(message.clone());
                drop(session);
                self.emit(SessionEvent::Error { message });
            }
            CaptureEvent::End => {
                debug!("Capture session ended without a result");
                let mut session = self.session.write();
                if session.recording == RecordingStatus::Recording {
                    session.recording = RecordingStatus::Idle;
                    drop(session);
                    self.emit(SessionEvent::RecordingStopped);
                }
            }
        }
    }

    /// Issue the translation request for a finalized transcript.
    ///
    /// The in-flight flag is cleared by the drop guard on every exit path;
    /// results are applied only while `generation` is still current.
    async fn run_translation(
        self: Arc<Self>,
        generation: u64,
        text: String,
        language: &'static SupportedLanguage,
    ) {
        if self.translation_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Translation superseded before it was issued");
            return;
        }

        self.session.write().translation_status = TranslationStatus::InFlight;
        self.emit(SessionEvent::TranslationStarted);

        let _guard = FlightGuard {
            controller: Arc::clone(&self),
            generation,
        };

        match self.translator.translate(&text, language.name).await {
            Ok(translated) => {
                if self.translation_generation.load(Ordering::SeqCst) != generation {
                    debug!(generation, "Discarding stale translation response");
                    return;
                }
                info!(language = language.name, "Translation completed");
                self.session.write().translation = translated.clone();
                self.emit(SessionEvent::TranslationReady { text: translated });
            }
            Err(e) => {
                warn!(error = %e, "Translation request failed");
                if self.translation_generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                // Transcript is preserved so the user can see what was sent.
                self.session.write().last_error = Some(TRANSLATION_FAILED_MESSAGE.to_string());
                self.emit(SessionEvent::Error {
                    message: TRANSLATION_FAILED_MESSAGE.to_string(),
                });
            }
        }
    }

    /// Change the selected language.
    ///
    /// Takes effect on the next capture; a pending capture keeps the locale
    /// it was started with.
    pub fn select_language(&self, locale_tag: &str) -> Result<&'static SupportedLanguage, DomainError> {
        let language = by_locale_tag(locale_tag)
            .ok_or_else(|| DomainError::UnknownLanguage(locale_tag.to_string()))?;
        self.session.write().selected_language = language;
        info!(language = language.name, locale = language.locale_tag, "Language selected");
        self.emit(SessionEvent::LanguageChanged {
            locale_tag: language.locale_tag.to_string(),
        });
        Ok(language)
    }

    /// Speak the current translation via the synthesizer.
    ///
    /// Playback is only available once a translation exists.
    pub fn speak_translation(&self) -> Result<(), DomainError> {
        let text = self.session.read().translation.clone();
        if text.is_empty() {
            return Err(DomainError::NothingToSpeak);
        }
        self.synthesizer.speak(&text, &self.config.speech.output_locale);
        self.emit(SessionEvent::PlaybackStarted);
        Ok(())
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine; the pipeline does not depend on listeners.
        let _ = self.events.send(event);
    }
}

/// Clears the in-flight flag when a translation attempt finishes, however it
/// finishes. Checks the generation so a stale attempt cannot knock down a
/// newer request's flag.
struct FlightGuard {
    controller: Arc<AppController>,
    generation: u64,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if self
            .controller
            .translation_generation
            .load(Ordering::SeqCst)
            == self.generation
        {
            self.controller.session.write().translation_status = TranslationStatus::Idle;
        }
    }
}
