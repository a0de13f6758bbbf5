use voxport_core::RecognizerConfig;
use voxport_engine::{RecognizerRegistry, SpeechRecognizer};

/// Look for a usable recognizer.
///
/// Returns `None` when the configured engine is unknown or fails to
/// initialise; the bridge treats that as the capability being absent.
pub async fn probe(
    registry: &RecognizerRegistry,
    config: &RecognizerConfig,
) -> Option<Box<dyn SpeechRecognizer>> {
    let mut recognizer = match registry.create(&config.engine) {
        Ok(recognizer) => recognizer,
        Err(e) => {
            tracing::warn!(
                engine = %config.engine,
                available = ?registry.list_engines(),
                "speech recognition unavailable: {e}"
            );
            return None;
        }
    };

    if let Err(e) = recognizer.initialize(config.engine_options()).await {
        tracing::warn!(engine = %config.engine, "speech recognition unavailable: {e}");
        return None;
    }

    tracing::info!(engine = %config.engine, "speech recognition available");
    Some(recognizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxport_core::{AppConfig, ScriptedConfig};

    #[tokio::test]
    async fn test_probe_known_engine() {
        let registry = RecognizerRegistry::new();
        let config = RecognizerConfig {
            engine: "null".to_string(),
            scripted: None,
        };
        let recognizer = probe(&registry, &config).await.unwrap();
        assert_eq!(recognizer.name(), "null");
    }

    #[tokio::test]
    async fn test_probe_unknown_engine_is_missing() {
        let registry = RecognizerRegistry::new();
        let config = RecognizerConfig {
            engine: "webkit".to_string(),
            scripted: None,
        };
        assert!(probe(&registry, &config).await.is_none());
    }

    #[tokio::test]
    async fn test_probe_scripted_with_options() {
        let registry = RecognizerRegistry::new();
        let config = RecognizerConfig {
            engine: "scripted".to_string(),
            scripted: Some(ScriptedConfig {
                utterances: vec!["hello".to_string()],
                word_interval_ms: 5,
                utterances_per_session: 1,
            }),
        };
        let recognizer = probe(&registry, &config).await.unwrap();
        assert_eq!(recognizer.name(), "scripted");
    }

    #[tokio::test]
    async fn test_probe_default_config() {
        let registry = RecognizerRegistry::new();
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(probe(&registry, &config.recognizer).await.is_some());
    }
}
