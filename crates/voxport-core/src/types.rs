use std::fmt;

/// Fixed settings applied to a recognizer when the bridge takes ownership of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerSettings {
    /// Keep listening after the first utterance.
    pub continuous: bool,
    /// Deliver provisional results before they are finalized.
    pub interim_results: bool,
    pub lang: String,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            lang: "en-US".to_string(),
        }
    }
}

/// One transcription candidate for a result slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f32,
}

/// A single recognition result; candidates are ordered best first.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSlot {
    pub is_final: bool,
    pub alternatives: Vec<Alternative>,
}

impl ResultSlot {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self::with_transcript(false, transcript)
    }

    pub fn final_result(transcript: impl Into<String>) -> Self {
        Self::with_transcript(true, transcript)
    }

    fn with_transcript(is_final: bool, transcript: impl Into<String>) -> Self {
        Self {
            is_final,
            alternatives: vec![Alternative {
                transcript: transcript.into(),
                confidence: 1.0,
            }],
        }
    }

    pub fn top(&self) -> Option<&Alternative> {
        self.alternatives.first()
    }
}

/// The full result list of a session plus the index of the first slot that
/// changed since the previous batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultBatch {
    pub result_index: usize,
    pub results: Vec<ResultSlot>,
}

impl ResultBatch {
    /// Slots at or after `result_index`. Empty if the index is out of range.
    pub fn new_slots(&self) -> &[ResultSlot] {
        self.results.get(self.result_index..).unwrap_or(&[])
    }
}

/// Error codes a recognizer reports asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    NoSpeech,
    Aborted,
    AudioCapture,
    Network,
    NotAllowed,
    ServiceNotAllowed,
    BadGrammar,
    LanguageNotSupported,
    Other(String),
}

impl RecognitionErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSpeech => "no-speech",
            Self::Aborted => "aborted",
            Self::AudioCapture => "audio-capture",
            Self::Network => "network",
            Self::NotAllowed => "not-allowed",
            Self::ServiceNotAllowed => "service-not-allowed",
            Self::BadGrammar => "bad-grammar",
            Self::LanguageNotSupported => "language-not-supported",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for RecognitionErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "not-allowed" => Self::NotAllowed,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "bad-grammar" => Self::BadGrammar,
            "language-not-supported" => Self::LanguageNotSupported,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RecognitionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionErrorEvent {
    pub error: RecognitionErrorCode,
    pub message: String,
}

/// Lifecycle events delivered by a recognizer, in platform order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    Started,
    Result(ResultBatch),
    Error(RecognitionErrorEvent),
    Ended,
}
