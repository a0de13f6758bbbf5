pub mod config;
pub mod error;
pub mod ports;
pub mod types;

pub use config::{AppConfig, RecognizerConfig, ScriptedConfig};
pub use error::{BridgeError, ConfigError, RecognizerError};
pub use ports::{BridgeStatus, PortCommand, PortMessage};
pub use types::{
    Alternative, RecognitionErrorCode, RecognitionErrorEvent, RecognitionEvent,
    RecognizerSettings, ResultBatch, ResultSlot,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recognizer_settings() {
        let settings = RecognizerSettings::default();
        assert!(settings.continuous);
        assert!(settings.interim_results);
        assert_eq!(settings.lang, "en-US");
    }

    #[test]
    fn test_result_slot_top_alternative() {
        let slot = ResultSlot {
            is_final: true,
            alternatives: vec![
                Alternative {
                    transcript: "hello world".to_string(),
                    confidence: 0.9,
                },
                Alternative {
                    transcript: "yellow world".to_string(),
                    confidence: 0.4,
                },
            ],
        };
        assert_eq!(slot.top().unwrap().transcript, "hello world");

        let empty = ResultSlot {
            is_final: true,
            alternatives: Vec::new(),
        };
        assert!(empty.top().is_none());
    }

    #[test]
    fn test_result_batch_new_slots() {
        let batch = ResultBatch {
            result_index: 1,
            results: vec![
                ResultSlot::final_result("old"),
                ResultSlot::interim("new"),
            ],
        };
        assert_eq!(batch.new_slots().len(), 1);
        assert_eq!(batch.new_slots()[0].top().unwrap().transcript, "new");
    }

    #[test]
    fn test_result_batch_index_out_of_range() {
        let batch = ResultBatch {
            result_index: 5,
            results: vec![ResultSlot::final_result("only")],
        };
        assert!(batch.new_slots().is_empty());
    }

    #[test]
    fn test_error_code_round_trips_known_codes() {
        for code in ["no-speech", "aborted", "network", "not-allowed"] {
            assert_eq!(RecognitionErrorCode::from(code).as_str(), code);
        }
        assert_eq!(
            RecognitionErrorCode::from("weird"),
            RecognitionErrorCode::Other("weird".to_string())
        );
    }
}
