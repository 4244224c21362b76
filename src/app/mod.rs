pub mod controller;

pub use controller::{AppController, TRANSLATION_FAILED_MESSAGE};
