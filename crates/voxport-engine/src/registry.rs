use crate::recognizer_trait::SpeechRecognizer;
use std::collections::HashMap;
use voxport_core::RecognizerError;

pub struct RecognizerRegistry {
    factories: HashMap<String, fn() -> Box<dyn SpeechRecognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || {
            Box::new(crate::null_recognizer::NullRecognizer::new())
        });
        registry.register("scripted", || {
            Box::new(crate::scripted::ScriptedRecognizer::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn SpeechRecognizer>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn SpeechRecognizer>, RecognizerError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| RecognizerError::EngineNotFound(name.to_string()))
    }

    pub fn list_engines(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for RecognizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
