/// Commands the application sends to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCommand {
    StartRecording,
    StopRecording,
}

impl PortCommand {
    pub fn port_name(&self) -> &'static str {
        match self {
            Self::StartRecording => "startRecording",
            Self::StopRecording => "stopRecording",
        }
    }
}

/// Messages the bridge sends to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortMessage {
    TranscriptionReceived(String),
    RecordingError(String),
}

impl PortMessage {
    pub fn port_name(&self) -> &'static str {
        match self {
            Self::TranscriptionReceived(_) => "transcriptionReceived",
            Self::RecordingError(_) => "recordingError",
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::TranscriptionReceived(text) | Self::RecordingError(text) => text,
        }
    }
}

/// Snapshot of the bridge published after every handled command or event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeStatus {
    pub supported: bool,
    pub recording: bool,
    pub engine: Option<String>,
}
