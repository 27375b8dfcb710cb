//! Result Widget
//!
//! Shows the result text verbatim, wrapped to the panel width.

use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_result(frame: &mut Frame, area: Rect, text: &str) {
    let block = Block::default()
        .title(" Analysis Result ")
        .title_style(Theme::heading())
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    // Plain text, no markup interpretation
    let paragraph = Paragraph::new(text.to_string())
        .style(Theme::text())
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(paragraph, area);
}
