use thiserror::Error;
use tokio::sync::{mpsc, watch};
use voxport_core::{BridgeStatus, PortCommand, PortMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bridge is no longer running, {} dropped", .0.port_name())]
pub struct PortClosed(pub PortCommand);

/// Application-side sender for the `startRecording` / `stopRecording` ports.
#[derive(Debug, Clone)]
pub struct CommandPort {
    tx: mpsc::UnboundedSender<PortCommand>,
}

impl CommandPort {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PortCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: PortCommand) -> Result<(), PortClosed> {
        self.tx.send(command).map_err(|e| PortClosed(e.0))
    }

    pub fn start_recording(&self) -> Result<(), PortClosed> {
        self.send(PortCommand::StartRecording)
    }

    pub fn stop_recording(&self) -> Result<(), PortClosed> {
        self.send(PortCommand::StopRecording)
    }
}

/// Everything the application needs to talk to a running bridge.
pub struct AppPorts {
    pub commands: CommandPort,
    /// `transcriptionReceived` and `recordingError`, in emission order.
    pub messages: mpsc::UnboundedReceiver<PortMessage>,
    pub status: watch::Receiver<BridgeStatus>,
}
