use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for the external translation endpoint.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    /// Translate `text` from the named source language to English.
    ///
    /// `text` must be non-empty; the transcript that triggers this call is
    /// guaranteed non-empty by the recognizer contract. Issues exactly one
    /// request per call; no retry is attempted on failure.
    async fn translate(
        &self,
        text: &str,
        source_language_name: &str,
    ) -> Result<String, DomainError>;
}
