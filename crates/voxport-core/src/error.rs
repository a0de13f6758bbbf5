use thiserror::Error;

use crate::types::RecognitionErrorCode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid interpolation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failures raised by a recognizer implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizerError {
    #[error("recognizer initialization failed: {0}")]
    InitializationFailed(String),

    /// The call is not valid in the recognizer's current state,
    /// e.g. `start` while a session is already running.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("recognizer failed to start: {0}")]
    StartFailed(String),

    #[error("recognizer engine not found: {0}")]
    EngineNotFound(String),
}

/// Everything the bridge reports on the `recordingError` port.
///
/// The `Display` output is the exact string delivered to the application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Speech recognition not supported in this browser")]
    CapabilityMissing,

    #[error("Speech recognition not initialized")]
    NotInitialized,

    #[error("Failed to start recording: {0}")]
    StartFailure(String),

    #[error("Recognition error: {0}")]
    PlatformError(RecognitionErrorCode),

    #[error("Failed to restart recognition")]
    RestartFailure,
}
