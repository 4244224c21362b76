use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::ports::SpeechSynthesizer;

/// Speech synthesis via the platform's speech utility.
///
/// Fire-and-forget: the child process is spawned detached and never awaited.
/// If a prior utterance is still speaking, the platform's own policy governs
/// whether output overlaps or queues.
pub struct SystemSynthesizer;

impl SystemSynthesizer {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "macos")]
    fn command(text: &str, _locale_tag: &str) -> Command {
        let mut cmd = Command::new("say");
        cmd.arg(text);
        cmd
    }

    #[cfg(target_os = "linux")]
    fn command(text: &str, locale_tag: &str) -> Command {
        // speech-dispatcher takes a bare language code, not a full tag.
        let language = locale_tag.split('-').next().unwrap_or("en");
        let mut cmd = Command::new("spd-say");
        cmd.arg("-l").arg(language).arg(text);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn command(text: &str, _locale_tag: &str) -> Command {
        let escaped = text.replace('\'', "''");
        let mut cmd = Command::new("powershell");
        cmd.arg("-NoProfile").arg("-Command").arg(format!(
            "Add-Type -AssemblyName System.Speech; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
            escaped
        ));
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    fn command(text: &str, _locale_tag: &str) -> Command {
        let mut cmd = Command::new("espeak");
        cmd.arg(text);
        cmd
    }
}

impl Default for SystemSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for SystemSynthesizer {
    fn speak(&self, text: &str, locale_tag: &str) {
        let mut cmd = Self::command(text, locale_tag);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match cmd.spawn() {
            Ok(_) => debug!(locale = locale_tag, chars = text.len(), "Playback started"),
            Err(e) => warn!(error = %e, "Failed to start speech synthesis"),
        }
    }
}
