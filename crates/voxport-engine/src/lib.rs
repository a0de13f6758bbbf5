pub mod null_recognizer;
pub mod recognizer_trait;
pub mod registry;
pub mod scripted;

pub use null_recognizer::NullRecognizer;
pub use recognizer_trait::SpeechRecognizer;
pub use registry::RecognizerRegistry;
pub use scripted::ScriptedRecognizer;
