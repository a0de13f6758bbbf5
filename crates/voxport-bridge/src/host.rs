use crate::bridge::RecognitionBridge;
use crate::ports::{AppPorts, CommandPort};
use tokio::sync::{mpsc, oneshot, watch};
use voxport_core::{BridgeStatus, PortCommand, RecognitionEvent};
use voxport_engine::SpeechRecognizer;

/// Runs a [`RecognitionBridge`] on its own task.
///
/// Commands and recognizer events are handled strictly one at a time, in the
/// order each channel delivers them. Pending recognizer events always go
/// before the next command. Dropping the host stops the bridge.
pub struct BridgeHost {
    ports: Option<AppPorts>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl BridgeHost {
    /// Build the bridge around the probed recognizer and start its task.
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        if let Some(recognizer) = recognizer.as_mut() {
            recognizer.set_event_sender(event_tx);
        }

        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let bridge = RecognitionBridge::new(recognizer, message_tx);
        let (status_tx, status_rx) = watch::channel(bridge.status());

        let task = BridgeTask {
            bridge,
            command_rx,
            event_rx,
            status_tx,
            shutdown_rx,
        };
        let handle = tokio::spawn(task.run());

        Self {
            ports: Some(AppPorts {
                commands: CommandPort::new(command_tx),
                messages: message_rx,
                status: status_rx,
            }),
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(handle),
        }
    }

    pub fn take_ports(&mut self) -> Option<AppPorts> {
        self.ports.take()
    }

    /// Stop the bridge task, ending any active session.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}

struct BridgeTask {
    bridge: RecognitionBridge,
    command_rx: mpsc::UnboundedReceiver<PortCommand>,
    event_rx: mpsc::UnboundedReceiver<RecognitionEvent>,
    status_tx: watch::Sender<BridgeStatus>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl BridgeTask {
    async fn run(mut self) {
        loop {
            // Events queued by a `stop()` must be seen before the next command,
            // otherwise a stale `Ended` reads as the end of the new session.
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    tracing::debug!("bridge shutdown requested");
                    break;
                }
                Some(event) = self.event_rx.recv() => {
                    self.bridge.handle_event(event);
                }
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => self.bridge.handle_command(command),
                        None => {
                            tracing::debug!("all command ports dropped, shutting down");
                            break;
                        }
                    }
                }
            }
            self.publish_status();
        }

        let mut last = self.bridge.status();
        last.recording = false;
        self.bridge.close().await;
        self.status_tx.send_replace(last);
    }

    fn publish_status(&self) {
        let status = self.bridge.status();
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}
