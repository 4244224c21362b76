pub mod config;
pub mod error;
pub mod language;
pub mod session;

pub use config::AppConfig;
pub use error::DomainError;
pub use language::{by_locale_tag, default_language, SupportedLanguage, SUPPORTED_LANGUAGES};
pub use session::{
    CaptureEvent, RecordingStatus, SessionEvent, SessionSnapshot, SessionState, TranslationStatus,
};
