use tokio::sync::mpsc;
use voxport_core::{
    BridgeError, BridgeStatus, PortCommand, PortMessage, RecognitionErrorEvent, RecognitionEvent,
    RecognizerSettings, ResultBatch,
};
use voxport_engine::SpeechRecognizer;

/// Connects one recognizer to the application's ports.
///
/// Handlers take `&mut self` and are driven one at a time by
/// [`BridgeHost`](crate::BridgeHost); every outbound message is sent before the
/// handler that produced it returns.
pub struct RecognitionBridge {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    recording: bool,
    outbound: mpsc::UnboundedSender<PortMessage>,
}

impl RecognitionBridge {
    /// Take ownership of the recognizer found by the capability probe.
    ///
    /// Without one, a single `CapabilityMissing` error is reported and the
    /// bridge stays inert for the rest of its life.
    pub fn new(
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        outbound: mpsc::UnboundedSender<PortMessage>,
    ) -> Self {
        let mut bridge = Self {
            recognizer,
            recording: false,
            outbound,
        };

        match bridge.recognizer.as_mut() {
            Some(recognizer) => {
                let settings = RecognizerSettings::default();
                recognizer.configure(&settings);
                tracing::info!(
                    engine = %recognizer.name(),
                    continuous = settings.continuous,
                    interim_results = settings.interim_results,
                    lang = %settings.lang,
                    "speech recognition configured"
                );
            }
            None => bridge.report(BridgeError::CapabilityMissing),
        }

        bridge
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn status(&self) -> BridgeStatus {
        BridgeStatus {
            supported: self.is_supported(),
            recording: self.recording,
            engine: self.recognizer.as_ref().map(|r| r.name().to_string()),
        }
    }

    pub fn handle_command(&mut self, command: PortCommand) {
        match command {
            PortCommand::StartRecording => self.start_recording(),
            PortCommand::StopRecording => self.stop_recording(),
        }
    }

    pub fn start_recording(&mut self) {
        tracing::info!("start recording requested");
        let Some(recognizer) = self.recognizer.as_ref() else {
            self.report(BridgeError::NotInitialized);
            return;
        };

        self.recording = true;
        if let Err(e) = recognizer.start() {
            self.recording = false;
            self.report(BridgeError::StartFailure(e.to_string()));
        }
    }

    pub fn stop_recording(&mut self) {
        tracing::info!("stop recording requested");
        self.recording = false;
        if let Some(recognizer) = self.recognizer.as_ref() {
            recognizer.stop();
        }
    }

    pub fn handle_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Started => tracing::info!("speech recognition started"),
            RecognitionEvent::Result(batch) => self.on_result(&batch),
            RecognitionEvent::Error(error) => self.on_error(error),
            RecognitionEvent::Ended => self.on_end(),
        }
    }

    fn on_result(&self, batch: &ResultBatch) {
        for slot in batch.new_slots().iter().filter(|s| s.is_final) {
            let Some(best) = slot.top() else {
                continue;
            };
            let transcript = best.transcript.trim();
            if transcript.is_empty() {
                continue;
            }
            tracing::debug!(%transcript, "forwarding transcript");
            self.emit(PortMessage::TranscriptionReceived(transcript.to_string()));
        }
    }

    fn on_error(&mut self, error: RecognitionErrorEvent) {
        tracing::error!(error = %error.error, message = %error.message, "speech recognition error");
        self.report(BridgeError::PlatformError(error.error));
        self.recording = false;
    }

    fn on_end(&mut self) {
        tracing::info!(recording = self.recording, "speech recognition ended");
        if !self.recording {
            return;
        }
        let Some(recognizer) = self.recognizer.as_ref() else {
            return;
        };

        // Immediate single attempt; no backoff or limit.
        if let Err(e) = recognizer.start() {
            tracing::error!("failed to restart recognition: {e}");
            self.report(BridgeError::RestartFailure);
            self.recording = false;
        }
    }

    /// Stop any active session and release the recognizer.
    pub async fn close(mut self) {
        if self.recording {
            self.stop_recording();
        }
        if let Some(recognizer) = self.recognizer.take() {
            if let Err(e) = recognizer.shutdown().await {
                tracing::warn!(engine = %recognizer.name(), "recognizer shutdown failed: {e}");
            }
        }
    }

    fn report(&self, error: BridgeError) {
        tracing::warn!("{error}");
        self.emit(PortMessage::RecordingError(error.to_string()));
    }

    fn emit(&self, message: PortMessage) {
        if self.outbound.send(message).is_err() {
            tracing::debug!("application port closed, message dropped");
        }
    }
}
