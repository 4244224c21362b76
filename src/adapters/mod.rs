pub mod completion_api;
pub mod config_store;
pub mod console_input;
pub mod system_tts;

pub use completion_api::CompletionApiClient;
pub use config_store::TomlConfigStore;
pub use console_input::ConsoleRecognizer;
pub use system_tts::SystemSynthesizer;
