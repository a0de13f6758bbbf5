use async_trait::async_trait;
use tokio::sync::mpsc;
use voxport_core::{RecognitionEvent, RecognizerError, RecognizerSettings};

/// A speech-recognition engine driven by start/stop calls that reports its
/// lifecycle through [`RecognitionEvent`]s.
///
/// `start` and `stop` are synchronous: a failing `start` is reported to the
/// caller immediately, while everything the engine hears arrives later on the
/// event sender.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Returns the engine's registry name (e.g. `"scripted"`).
    fn name(&self) -> &str;
    /// One-time initialisation with engine-specific TOML options.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError>;
    /// Apply listening settings. Takes effect on the next `start`.
    fn configure(&mut self, settings: &RecognizerSettings);
    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<RecognitionEvent>);
    /// Begin a listening session. Fails with `InvalidState` if one is running.
    fn start(&self) -> Result<(), RecognizerError>;
    /// End the current session, if any. An `Ended` event follows.
    fn stop(&self);
    /// Release engine resources.
    async fn shutdown(&self) -> Result<(), RecognizerError>;
}
