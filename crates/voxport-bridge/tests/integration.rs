use std::time::Duration;
use voxport_bridge::{probe, AppPorts, BridgeHost};
use voxport_core::{
    AppConfig, PortMessage, RecognitionErrorCode, RecognitionErrorEvent, RecognitionEvent,
    ResultBatch, ResultSlot,
};
use voxport_engine::{NullRecognizer, RecognizerRegistry};

const TIMEOUT: Duration = Duration::from_secs(2);

async fn next_message(ports: &mut AppPorts) -> PortMessage {
    tokio::time::timeout(TIMEOUT, ports.messages.recv())
        .await
        .expect("timed out")
        .expect("channel closed")
}

async fn wait_for_recording(ports: &mut AppPorts, recording: bool) {
    tokio::time::timeout(TIMEOUT, ports.status.wait_for(|s| s.recording == recording))
        .await
        .expect("timed out")
        .expect("status channel closed");
}

async fn assert_quiet(ports: &mut AppPorts) {
    let extra = tokio::time::timeout(Duration::from_millis(50), ports.messages.recv()).await;
    assert!(extra.is_err(), "unexpected message: {:?}", extra);
}

async fn spawn_from_config(toml: &str) -> (BridgeHost, AppPorts) {
    let config = AppConfig::from_toml_str(toml).unwrap();
    let registry = RecognizerRegistry::new();
    let recognizer = probe(&registry, &config.recognizer).await;
    let mut host = BridgeHost::spawn(recognizer);
    let ports = host.take_ports().unwrap();
    (host, ports)
}

#[tokio::test]
async fn test_unsupported_engine_end_to_end() {
    let (mut host, mut ports) = spawn_from_config(
        r#"
[recognizer]
engine = "none"
"#,
    )
    .await;

    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::RecordingError("Speech recognition not supported in this browser".into())
    );

    for _ in 0..3 {
        ports.commands.start_recording().unwrap();
        ports.commands.stop_recording().unwrap();
        assert_eq!(
            next_message(&mut ports).await,
            PortMessage::RecordingError("Speech recognition not initialized".into())
        );
    }
    assert_quiet(&mut ports).await;

    host.shutdown().await;
}

#[tokio::test]
async fn test_hello_world_scenario() {
    let recognizer = NullRecognizer::new();
    let mut host = BridgeHost::spawn(Some(Box::new(recognizer.clone())));
    let mut ports = host.take_ports().unwrap();

    ports.commands.start_recording().unwrap();
    wait_for_recording(&mut ports, true).await;

    recognizer.emit(RecognitionEvent::Result(ResultBatch {
        result_index: 0,
        results: vec![ResultSlot::final_result("hello world ")],
    }));

    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::TranscriptionReceived("hello world".into())
    );
    assert!(ports.status.borrow().recording);

    host.shutdown().await;
}

#[tokio::test]
async fn test_interim_only_scenario() {
    let recognizer = NullRecognizer::new();
    let mut host = BridgeHost::spawn(Some(Box::new(recognizer.clone())));
    let mut ports = host.take_ports().unwrap();

    ports.commands.start_recording().unwrap();
    wait_for_recording(&mut ports, true).await;

    recognizer.emit(RecognitionEvent::Result(ResultBatch {
        result_index: 0,
        results: vec![ResultSlot::interim("hello")],
    }));
    assert_quiet(&mut ports).await;

    host.shutdown().await;
}

#[tokio::test]
async fn test_platform_error_stops_auto_restart() {
    let recognizer = NullRecognizer::new();
    let mut host = BridgeHost::spawn(Some(Box::new(recognizer.clone())));
    let mut ports = host.take_ports().unwrap();

    ports.commands.start_recording().unwrap();
    wait_for_recording(&mut ports, true).await;

    recognizer.emit(RecognitionEvent::Error(RecognitionErrorEvent {
        error: RecognitionErrorCode::AudioCapture,
        message: "no microphone".into(),
    }));
    recognizer.end_session();

    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::RecordingError("Recognition error: audio-capture".into())
    );
    wait_for_recording(&mut ports, false).await;
    assert_quiet(&mut ports).await;
    assert_eq!(recognizer.start_count(), 1);

    host.shutdown().await;
}

#[tokio::test]
async fn test_scripted_session_auto_restarts() {
    let (mut host, mut ports) = spawn_from_config(
        r#"
[recognizer]
engine = "scripted"

[recognizer.scripted]
utterances = ["first sentence ", "second sentence", "third sentence"]
word_interval_ms = 5
utterances_per_session = 1
"#,
    )
    .await;

    ports.commands.start_recording().unwrap();

    // Each session ends after one utterance; the bridge restarts it every time.
    let mut heard = Vec::new();
    while heard.len() < 3 {
        match next_message(&mut ports).await {
            PortMessage::TranscriptionReceived(text) => heard.push(text),
            other => panic!("unexpected message {:?}", other),
        }
    }
    assert_eq!(
        heard,
        vec!["first sentence", "second sentence", "third sentence"]
    );

    ports.commands.stop_recording().unwrap();
    wait_for_recording(&mut ports, false).await;
    host.shutdown().await;
}

#[tokio::test]
async fn test_scripted_error_reaches_application() {
    let (mut host, mut ports) = spawn_from_config(
        r#"
[recognizer]
engine = "scripted"

[recognizer.scripted]
utterances = ["just one", "!no-speech", "never heard"]
word_interval_ms = 5
utterances_per_session = 0
"#,
    )
    .await;

    ports.commands.start_recording().unwrap();

    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::TranscriptionReceived("just one".into())
    );
    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::RecordingError("Recognition error: no-speech".into())
    );
    wait_for_recording(&mut ports, false).await;
    assert_quiet(&mut ports).await;

    host.shutdown().await;
}

#[tokio::test]
async fn test_restart_failure_reported_once() {
    let recognizer = NullRecognizer::new();
    let mut host = BridgeHost::spawn(Some(Box::new(recognizer.clone())));
    let mut ports = host.take_ports().unwrap();

    ports.commands.start_recording().unwrap();
    wait_for_recording(&mut ports, true).await;

    recognizer.fail_next_start(voxport_core::RecognizerError::StartFailed("gone".into()));
    recognizer.end_session();

    assert_eq!(
        next_message(&mut ports).await,
        PortMessage::RecordingError("Failed to restart recognition".into())
    );
    wait_for_recording(&mut ports, false).await;
    assert_eq!(recognizer.start_count(), 2);

    host.shutdown().await;
}

#[tokio::test]
async fn test_scripted_quick_stop_start_keeps_recording() {
    let (mut host, mut ports) = spawn_from_config(
        r#"
[recognizer]
engine = "scripted"

[recognizer.scripted]
utterances = ["again and again"]
word_interval_ms = 5
utterances_per_session = 0
"#,
    )
    .await;

    for _ in 0..5 {
        ports.commands.start_recording().unwrap();
        wait_for_recording(&mut ports, true).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        ports.commands.stop_recording().unwrap();
        ports.commands.start_recording().unwrap();

        // The new session keeps producing transcripts and no restart error shows up.
        for _ in 0..2 {
            match next_message(&mut ports).await {
                PortMessage::TranscriptionReceived(text) => assert_eq!(text, "again and again"),
                other => panic!("unexpected message {:?}", other),
            }
        }
        wait_for_recording(&mut ports, true).await;

        ports.commands.stop_recording().unwrap();
        wait_for_recording(&mut ports, false).await;
        while ports.messages.try_recv().is_ok() {}
    }

    host.shutdown().await;
}
