//! Analyze Button
//!
//! Two presentation states: idle and in-progress. Disabled while busy or
//! when no file is selected.

use crate::controller::Controller;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const IDLE_LABEL: &str = "Analyze Image";
pub const BUSY_LABEL: &str = "Analyzing...";

pub fn button_label(controller: &Controller, spinner_frame: usize) -> String {
    if controller.is_busy() {
        format!("{} {}", Icons::spinner(spinner_frame), BUSY_LABEL)
    } else {
        format!("{} {}", Icons::SEARCH, IDLE_LABEL)
    }
}

pub fn render_action(frame: &mut Frame, area: Rect, controller: &Controller, spinner_frame: usize) {
    let enabled = controller.can_analyze();
    let style = if enabled {
        Theme::button_enabled()
    } else {
        Theme::button_disabled()
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", button_label(controller, spinner_frame)),
        style,
    )];
    if enabled {
        spans.push(Span::styled("  [a]", Theme::shortcut_key()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(paragraph, area);
}
