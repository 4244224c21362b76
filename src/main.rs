#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use vaani::adapters::{CompletionApiClient, ConsoleRecognizer, SystemSynthesizer, TomlConfigStore};
use vaani::app::AppController;
use vaani::domain::{SessionEvent, SUPPORTED_LANGUAGES};
use vaani::infrastructure::init_logging;
use vaani::ports::ConfigStore;

const HELP: &str = "\
commands:
  record        start/stop a capture (while capturing, type the utterance and press Enter;
                an empty line ends the capture without a result)
  lang <tag>    select the spoken language by locale tag (see `langs`)
  langs         list supported languages
  say           speak the current translation aloud
  state         dump the session state
  help          show this help
  quit          exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_store = TomlConfigStore::new().context("config store init failed")?;
    let config = config_store.load().context("config load failed")?;

    let _log_guard = init_logging(
        &config_store.logs_dir(),
        &config.logging.level,
        config.logging.file_logging,
    )
    .context("logging init failed")?;

    let translator = Arc::new(
        CompletionApiClient::new(&config.api).context("translation client init failed")?,
    );
    let recognizer = Arc::new(ConsoleRecognizer::new());
    let synthesizer = Arc::new(SystemSynthesizer::new());

    let controller = Arc::new(AppController::new(
        config,
        recognizer.clone(),
        translator,
        synthesizer,
    ));
    controller.spawn_capture_loop();

    // Print session events as they arrive.
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::RecordingStarted => {
                    println!("listening... type the utterance and press Enter");
                }
                SessionEvent::RecordingStopped => println!("capture ended"),
                SessionEvent::TranscriptReady { text } => println!("you said: {}", text),
                SessionEvent::TranslationStarted => println!("translating..."),
                SessionEvent::TranslationReady { text } => println!("english: {}", text),
                SessionEvent::PlaybackStarted => println!("speaking..."),
                SessionEvent::Error { message } => println!("error: {}", message),
                SessionEvent::LanguageChanged { locale_tag } => {
                    println!("language set to {}", locale_tag);
                }
            }
        }
    });

    let selected = controller.session();
    println!("vaani — speak {} , read English", selected.language);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // While a capture is armed, the next line is the utterance.
        if recognizer.is_capturing() {
            recognizer.submit_line(&line);
            continue;
        }

        let mut parts = line.trim().split_whitespace();
        match parts.next() {
            Some("record") | Some("r") => {
                // Outcome (listening prompt or error) is printed by the
                // event task.
                controller.toggle_recording().await;
            }
            Some("lang") => match parts.next() {
                Some(tag) => {
                    if let Err(e) = controller.select_language(tag) {
                        println!("error: {}", e);
                    }
                }
                None => println!("usage: lang <locale-tag>"),
            },
            Some("langs") => {
                for language in SUPPORTED_LANGUAGES {
                    println!(
                        "  {:6} {} ({}) - {}",
                        language.locale_tag, language.name, language.native_name,
                        language.description
                    );
                }
            }
            Some("say") => {
                if let Err(e) = controller.speak_translation() {
                    println!("error: {}", e);
                }
            }
            Some("state") => {
                let snapshot = controller.session();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            Some("help") => println!("{}", HELP),
            Some("quit") | Some("q") | Some("exit") => break,
            Some(other) => println!("unknown command: {} (try `help`)", other),
            None => {}
        }
    }

    Ok(())
}
