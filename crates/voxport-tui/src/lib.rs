pub mod app;
pub mod log_layer;
pub mod ui;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use voxport_bridge::AppPorts;

pub use app::App;
pub use log_layer::TuiLogLayer;

/// Run the TUI event loop. Blocks until the user quits.
pub async fn run(
    mut ports: AppPorts,
    log_buffer: Arc<Mutex<VecDeque<String>>>,
) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut ports, &log_buffer).await;
    ratatui::restore();
    result
}

async fn run_loop(
    terminal: &mut DefaultTerminal,
    ports: &mut AppPorts,
    log_buffer: &Arc<Mutex<VecDeque<String>>>,
) -> std::io::Result<()> {
    let mut app = App::new(Arc::clone(log_buffer));

    loop {
        while let Ok(message) = ports.messages.try_recv() {
            app.apply_message(message);
        }
        if ports.status.has_changed().unwrap_or(false) {
            app.update_status(ports.status.borrow_and_update().clone());
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Short poll so bridge output shows up without a key press
        if event::poll(std::time::Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key) {
                        app::AppAction::Quit => break,
                        app::AppAction::Command(command) => {
                            if let Err(e) = ports.commands.send(command) {
                                tracing::warn!("{e}");
                            }
                        }
                        app::AppAction::None => {}
                    }
                }
            }
        }

        // Let the bridge task run between frames.
        tokio::task::yield_now().await;
    }

    Ok(())
}
