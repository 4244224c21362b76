pub mod config;
pub mod recognizer;
pub mod synthesizer;
pub mod translator;

pub use config::ConfigStore;
pub use recognizer::SpeechRecognizer;
pub use synthesizer::SpeechSynthesizer;
pub use translator::TranslationApi;
