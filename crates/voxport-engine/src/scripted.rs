//! A recognizer that "hears" a fixed script.
//!
//! Each utterance is revealed word by word as interim results and then
//! finalized. Entries starting with `!` are reported as recognition errors
//! (`"!no-speech"` → `no-speech`). A session ends on its own after
//! `utterances_per_session` final results, the way a platform recognizer ends
//! after a stretch of silence; `0` keeps the session open until `stop`.

use crate::recognizer_trait::SpeechRecognizer;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use voxport_core::{
    RecognitionErrorCode, RecognitionErrorEvent, RecognitionEvent, RecognizerError,
    RecognizerSettings, ResultBatch, ResultSlot, ScriptedConfig,
};

/// Settled results kept in a session's result list. Older ones are dropped
/// from the front, so `result_index` stays the position of the new slot.
const MAX_SESSION_RESULTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
enum ScriptStep {
    Speak(String),
    Fail(RecognitionErrorCode),
}

impl ScriptStep {
    fn parse(entry: &str) -> Self {
        match entry.strip_prefix('!') {
            Some(code) => Self::Fail(RecognitionErrorCode::from(code.trim())),
            None => Self::Speak(entry.to_string()),
        }
    }
}

#[derive(Default)]
struct SessionState {
    active: bool,
    /// Bumped on every start and stop; a session task only speaks while its
    /// generation is current.
    generation: u64,
    /// Next script step, carried across sessions.
    cursor: usize,
}

#[derive(Default)]
struct Shared {
    state: Mutex<SessionState>,
    event_sender: Mutex<Option<mpsc::UnboundedSender<RecognitionEvent>>>,
}

impl Shared {
    fn send(&self, event: RecognitionEvent) {
        if let Ok(sender) = self.event_sender.lock() {
            if let Some(tx) = sender.as_ref() {
                let _ = tx.send(event);
            }
        }
    }

    fn emit_if_current(&self, generation: u64, event: RecognitionEvent) -> bool {
        let Ok(state) = self.state.lock() else {
            return false;
        };
        if !state.active || state.generation != generation {
            return false;
        }
        self.send(event);
        true
    }

    fn next_step(&self, generation: u64, steps: &[ScriptStep]) -> Option<ScriptStep> {
        let mut state = self.state.lock().ok()?;
        if !state.active || state.generation != generation || steps.is_empty() {
            return None;
        }
        let step = steps[state.cursor % steps.len()].clone();
        state.cursor += 1;
        Some(step)
    }

    /// End the session from the recognizer's side, optionally reporting an
    /// error first.
    fn finish(&self, generation: u64, error: Option<RecognitionErrorEvent>) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if !state.active || state.generation != generation {
            return;
        }
        state.active = false;
        if let Some(error) = error {
            self.send(RecognitionEvent::Error(error));
        }
        self.send(RecognitionEvent::Ended);
    }
}

struct Session {
    shared: Arc<Shared>,
    steps: Arc<Vec<ScriptStep>>,
    generation: u64,
    settings: RecognizerSettings,
    word_interval: Duration,
    utterances_per_session: usize,
}

impl Session {
    async fn run(self) {
        let mut results: Vec<ResultSlot> = Vec::new();
        let mut finals = 0usize;

        while let Some(step) = self.shared.next_step(self.generation, &self.steps) {
            match step {
                ScriptStep::Fail(code) => {
                    tokio::time::sleep(self.word_interval).await;
                    let message = format!("scripted {} error", code);
                    self.shared.finish(
                        self.generation,
                        Some(RecognitionErrorEvent {
                            error: code,
                            message,
                        }),
                    );
                    return;
                }
                ScriptStep::Speak(text) => {
                    if results.len() >= MAX_SESSION_RESULTS {
                        results.drain(..=results.len() - MAX_SESSION_RESULTS);
                    }
                    let result_index = results.len();
                    if !self.speak(&text, result_index, &results).await {
                        return;
                    }

                    results.push(ResultSlot::final_result(text));
                    let batch = ResultBatch {
                        result_index,
                        results: results.clone(),
                    };
                    if !self
                        .shared
                        .emit_if_current(self.generation, RecognitionEvent::Result(batch))
                    {
                        return;
                    }

                    finals += 1;
                    let session_done = self.utterances_per_session > 0
                        && finals >= self.utterances_per_session;
                    if !self.settings.continuous || session_done {
                        self.shared.finish(self.generation, None);
                        return;
                    }
                }
            }
        }
    }

    /// Reveal `text` word by word as interim results, then wait one more
    /// interval before the final result. Returns `false` once the session is
    /// no longer current.
    async fn speak(&self, text: &str, result_index: usize, settled: &[ResultSlot]) -> bool {
        let words: Vec<&str> = text.split_whitespace().collect();
        if self.settings.interim_results {
            for n in 1..words.len() {
                tokio::time::sleep(self.word_interval).await;
                let mut results = settled.to_vec();
                results.push(ResultSlot::interim(words[..n].join(" ")));
                let batch = ResultBatch {
                    result_index,
                    results,
                };
                if !self
                    .shared
                    .emit_if_current(self.generation, RecognitionEvent::Result(batch))
                {
                    return false;
                }
            }
        }
        tokio::time::sleep(self.word_interval).await;
        true
    }
}

pub struct ScriptedRecognizer {
    steps: Arc<Vec<ScriptStep>>,
    word_interval: Duration,
    utterances_per_session: usize,
    settings: RecognizerSettings,
    shared: Arc<Shared>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::from_config(&ScriptedConfig::default())
    }

    pub fn from_config(config: &ScriptedConfig) -> Self {
        Self {
            steps: Arc::new(config.utterances.iter().map(|u| ScriptStep::parse(u)).collect()),
            word_interval: Duration::from_millis(config.word_interval_ms),
            utterances_per_session: config.utterances_per_session,
            settings: RecognizerSettings::default(),
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.state.lock().map(|s| s.active).unwrap_or(false)
    }
}

impl Default for ScriptedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError> {
        let config: ScriptedConfig = config
            .try_into()
            .map_err(|e: toml::de::Error| RecognizerError::InitializationFailed(e.to_string()))?;

        let shared = Arc::clone(&self.shared);
        *self = Self::from_config(&config);
        self.shared = shared;

        tracing::info!(
            utterances = self.steps.len(),
            word_interval_ms = config.word_interval_ms,
            utterances_per_session = config.utterances_per_session,
            "ScriptedRecognizer initialized"
        );
        Ok(())
    }

    fn configure(&mut self, settings: &RecognizerSettings) {
        self.settings = settings.clone();
    }

    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<RecognitionEvent>) {
        if let Ok(mut current) = self.shared.event_sender.lock() {
            *current = Some(sender);
        }
    }

    fn start(&self) -> Result<(), RecognizerError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| RecognizerError::StartFailed(e.to_string()))?;

        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| RecognizerError::StartFailed("session state poisoned".to_string()))?;
        if state.active {
            return Err(RecognizerError::InvalidState(
                "recognition has already started".to_string(),
            ));
        }
        state.active = true;
        state.generation += 1;
        self.shared.send(RecognitionEvent::Started);

        let session = Session {
            shared: Arc::clone(&self.shared),
            steps: Arc::clone(&self.steps),
            generation: state.generation,
            settings: self.settings.clone(),
            word_interval: self.word_interval,
            utterances_per_session: self.utterances_per_session,
        };
        drop(state);

        tracing::debug!(lang = %self.settings.lang, "scripted session started");
        runtime.spawn(session.run());
        Ok(())
    }

    fn stop(&self) {
        let Ok(mut state) = self.shared.state.lock() else {
            return;
        };
        if !state.active {
            return;
        }
        state.active = false;
        state.generation += 1;
        self.shared.send(RecognitionEvent::Ended);
    }

    async fn shutdown(&self) -> Result<(), RecognizerError> {
        if let Ok(mut state) = self.shared.state.lock() {
            state.active = false;
            state.generation += 1;
        }
        Ok(())
    }
}
