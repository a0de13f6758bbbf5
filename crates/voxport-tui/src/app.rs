use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent};
use voxport_core::{BridgeStatus, PortCommand, PortMessage};

/// Most recent errors kept on screen.
pub const MAX_ERRORS: usize = 5;

/// Transcripts kept for the Transcript tab; the oldest go first.
pub const MAX_TRANSCRIPTS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Transcript,
    Logs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    Quit,
    Command(PortCommand),
}

/// The host application: receives transcripts and errors from the bridge and
/// turns key presses into port commands.
pub struct App {
    pub tab: Tab,
    pub status: BridgeStatus,
    pub transcripts: VecDeque<String>,
    pub errors: VecDeque<String>,
    pub should_quit: bool,
    pub logs: Arc<Mutex<VecDeque<String>>>,
    pub log_scroll: usize,
    pub log_auto_scroll: bool,
}

impl App {
    pub fn new(logs: Arc<Mutex<VecDeque<String>>>) -> Self {
        Self {
            tab: Tab::Transcript,
            status: BridgeStatus::default(),
            transcripts: VecDeque::new(),
            errors: VecDeque::new(),
            should_quit: false,
            logs,
            log_scroll: 0,
            log_auto_scroll: true,
        }
    }

    pub fn update_status(&mut self, status: BridgeStatus) {
        self.status = status;
    }

    pub fn apply_message(&mut self, message: PortMessage) {
        match message {
            PortMessage::TranscriptionReceived(text) => {
                if self.transcripts.len() >= MAX_TRANSCRIPTS {
                    self.transcripts.pop_front();
                }
                self.transcripts.push_back(text);
            }
            PortMessage::RecordingError(error) => {
                if self.errors.len() >= MAX_ERRORS {
                    self.errors.pop_front();
                }
                self.errors.push_back(error);
            }
        }
    }

    pub fn transcript_text(&self) -> String {
        let parts: Vec<&str> = self.transcripts.iter().map(String::as_str).collect();
        parts.join(" ")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return AppAction::Quit;
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Transcript;
                return AppAction::None;
            }
            KeyCode::Char('2') => {
                self.tab = Tab::Logs;
                return AppAction::None;
            }
            KeyCode::Char('r') => return AppAction::Command(PortCommand::StartRecording),
            KeyCode::Char('s') => return AppAction::Command(PortCommand::StopRecording),
            KeyCode::Char(' ') => {
                let command = if self.status.recording {
                    PortCommand::StopRecording
                } else {
                    PortCommand::StartRecording
                };
                return AppAction::Command(command);
            }
            _ => {}
        }

        match self.tab {
            Tab::Transcript => self.handle_transcript_key(key),
            Tab::Logs => self.handle_logs_key(key),
        }
    }

    fn handle_transcript_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Char('c') {
            self.transcripts.clear();
            self.errors.clear();
        }
        AppAction::None
    }

    fn handle_logs_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => {
                self.log_scroll = self.log_scroll.saturating_add(1);
                self.log_auto_scroll = false;
            }
            KeyCode::Down => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            KeyCode::Char('G') => {
                self.log_scroll = 0;
                self.log_auto_scroll = true;
            }
            _ => {}
        }
        AppAction::None
    }
}
