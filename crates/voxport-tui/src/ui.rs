use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::app::{App, Tab, MAX_ERRORS};

pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, main_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(frame.area());

    draw_tabs(frame, app, tabs_area);

    match app.tab {
        Tab::Transcript => draw_transcript(frame, app, main_area),
        Tab::Logs => draw_logs(frame, app, main_area),
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab {
        Tab::Transcript => 0,
        Tab::Logs => 1,
    };
    let tabs = Tabs::new(vec!["1:Transcript", "2:Logs"])
        .block(Block::default().borders(Borders::ALL).title("voxport"))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn status_line(app: &App) -> Line<'static> {
    let (indicator, style) = if !app.status.supported {
        ("✕ unsupported", Style::default().fg(Color::Red))
    } else if app.status.recording {
        (
            "● recording",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        ("○ idle", Style::default().fg(Color::DarkGray))
    };
    let engine = app.status.engine.as_deref().unwrap_or("none");

    Line::from(vec![
        Span::styled(indicator, style),
        Span::raw(format!("  engine: {}", engine)),
        Span::raw("  (r=start, s=stop, space=toggle, c=clear, q=quit)"),
    ])
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let error_rows = if app.errors.is_empty() {
        0
    } else {
        app.errors.len().min(MAX_ERRORS) as u16 + 2
    };
    let [status_area, text_area, errors_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(error_rows),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(status_line(app)), status_area);

    let transcript = Paragraph::new(app.transcript_text())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Transcript"));
    frame.render_widget(transcript, text_area);

    if error_rows > 0 {
        let items: Vec<ListItem> = app
            .errors
            .iter()
            .map(|e| ListItem::new(e.as_str()).style(Style::default().fg(Color::Red)))
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Errors"));
        frame.render_widget(list, errors_area);
    }
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let Ok(logs) = app.logs.lock() else {
        return;
    };
    let total = logs.len();

    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let scroll = app.log_scroll.min(total.saturating_sub(visible_height));
    let end = total.saturating_sub(scroll);
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(start)
        .take(end - start)
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let title = if app.log_auto_scroll {
        "Logs (auto-scroll)"
    } else {
        "Logs (Up/Down=scroll, G=bottom)"
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}
