#![forbid(unsafe_code)]

//! Vaani: speak in an Indian regional language, read (and hear) it in English.
//!
//! The crate is a recording -> recognition -> translation -> playback pipeline
//! behind capability ports: speech recognition and synthesis are platform
//! facilities, translation is a single call to an external LLM completion
//! endpoint. [`app::AppController`] owns the session state machine; everything
//! else is an adapter.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use app::AppController;
pub use domain::{AppConfig, DomainError};
