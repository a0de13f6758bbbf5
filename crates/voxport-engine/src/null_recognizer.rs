use crate::recognizer_trait::SpeechRecognizer;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use voxport_core::{RecognitionEvent, RecognizerError, RecognizerSettings};

#[derive(Default)]
struct Inner {
    start_count: AtomicUsize,
    stop_count: AtomicUsize,
    active: AtomicBool,
    pending_failures: Mutex<VecDeque<RecognizerError>>,
    settings: Mutex<Option<RecognizerSettings>>,
    event_sender: Mutex<Option<mpsc::UnboundedSender<RecognitionEvent>>>,
}

/// A recognizer that hears nothing on its own.
///
/// Clones share state, so a clone kept outside the bridge can observe calls
/// and inject events.
#[derive(Clone, Default)]
pub struct NullRecognizer {
    inner: Arc<Inner>,
}

impl NullRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `start` calls, including failed ones.
    pub fn start_count(&self) -> usize {
        self.inner.start_count.load(Ordering::Relaxed)
    }

    pub fn stop_count(&self) -> usize {
        self.inner.stop_count.load(Ordering::Relaxed)
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    pub fn settings(&self) -> Option<RecognizerSettings> {
        self.inner.settings.lock().ok().and_then(|s| s.clone())
    }

    /// Queue an error returned by an upcoming `start`, in FIFO order.
    pub fn fail_next_start(&self, err: RecognizerError) {
        if let Ok(mut failures) = self.inner.pending_failures.lock() {
            failures.push_back(err);
        }
    }

    /// Send an event as if the platform produced it. Returns `false` when no
    /// sender is attached or the receiver is gone.
    pub fn emit(&self, event: RecognitionEvent) -> bool {
        match self.inner.event_sender.lock() {
            Ok(sender) => sender.as_ref().is_some_and(|tx| tx.send(event).is_ok()),
            Err(_) => false,
        }
    }

    /// End the session on the platform's initiative (silence, timeout).
    pub fn end_session(&self) -> bool {
        self.inner.active.store(false, Ordering::SeqCst);
        self.emit(RecognitionEvent::Ended)
    }
}

#[async_trait]
impl SpeechRecognizer for NullRecognizer {
    fn name(&self) -> &str {
        "null"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), RecognizerError> {
        Ok(())
    }

    fn configure(&mut self, settings: &RecognizerSettings) {
        if let Ok(mut current) = self.inner.settings.lock() {
            *current = Some(settings.clone());
        }
    }

    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<RecognitionEvent>) {
        if let Ok(mut current) = self.inner.event_sender.lock() {
            *current = Some(sender);
        }
    }

    fn start(&self) -> Result<(), RecognizerError> {
        self.inner.start_count.fetch_add(1, Ordering::Relaxed);

        let failure = self
            .inner
            .pending_failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.pop_front());
        if let Some(err) = failure {
            return Err(err);
        }

        if self.inner.active.swap(true, Ordering::SeqCst) {
            return Err(RecognizerError::InvalidState(
                "recognition has already started".to_string(),
            ));
        }

        self.emit(RecognitionEvent::Started);
        Ok(())
    }

    fn stop(&self) {
        self.inner.stop_count.fetch_add(1, Ordering::Relaxed);
        if self.inner.active.swap(false, Ordering::SeqCst) {
            self.emit(RecognitionEvent::Ended);
        }
    }

    async fn shutdown(&self) -> Result<(), RecognizerError> {
        self.inner.active.store(false, Ordering::SeqCst);
        Ok(())
    }
}
