/// Port for spoken playback of translations.
///
/// Fire-and-forget: implementations hand the utterance to the platform's
/// synthesis facility and return immediately. No completion callback is
/// consumed and no queuing discipline is imposed beyond the platform's own.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` using a voice for the given locale tag.
    fn speak(&self, text: &str, locale_tag: &str);
}
