//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::controller::Phase;
use crate::tui::app::{App, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const PREVIEW_HEIGHT: u16 = 9;
const ACTION_HEIGHT: u16 = 3;

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(8),    // Picker + preview/result
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_body(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", Icons::TITLE)),
            Span::styled("Image Analyzer", Theme::title()),
        ]),
        Line::from(Span::styled(
            "Upload an image to get AI-powered analysis",
            Theme::text_secondary(),
        )),
    ];

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    widgets::render_picker(frame, columns[0], &app.picker, app.view == View::Main);

    let controller = &app.controller;
    let has_preview = controller.preview().is_some();
    let result = controller.visible_result();

    let mut constraints = Vec::with_capacity(3);
    if has_preview {
        constraints.push(Constraint::Length(PREVIEW_HEIGHT));
    }
    constraints.push(Constraint::Length(ACTION_HEIGHT));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    let mut next = 0;
    if has_preview {
        widgets::render_preview(frame, rows[next], controller);
        next += 1;
    }
    widgets::render_action(frame, rows[next], controller, app.spinner_frame);
    next += 1;
    if let Some(text) = result {
        widgets::render_result(frame, rows[next], text);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.notice {
        Some(notice) => Span::styled(notice.clone(), Theme::error()),
        None => match app.controller.phase() {
            Phase::Idle => Span::styled("Choose an image", Theme::text_secondary()),
            Phase::Ready => Span::styled("Ready", Theme::complete()),
            Phase::Analyzing => Span::styled("Analyzing...", Theme::active()),
        },
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Open ", Theme::shortcut_desc()),
        Span::styled("[a]", Theme::shortcut_key()),
        Span::styled(" Analyze ", Theme::shortcut_desc()),
        Span::styled("[q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[?]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let bindings = [
        ("↑/↓ j/k      ", "Move in the file list"),
        ("PageUp/Down  ", "Move one page"),
        ("Home/End g/G ", "First / last entry"),
        ("Enter →      ", "Open directory / choose image"),
        ("Backspace ←  ", "Parent directory"),
        (".            ", "Show hidden files"),
        ("a / F5       ", "Analyze the chosen image"),
        ("Esc          ", "Dismiss status message"),
        ("q / Ctrl+Q   ", "Quit"),
        ("Ctrl+C       ", "Force quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
    ];
    lines.extend(bindings.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(*key, Theme::shortcut_key()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
