//! File Picker Widget
//!
//! Renders the directory listing with the highlighted entry.

use crate::tui::picker::{EntryKind, FilePicker};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the picker
pub fn render_picker(frame: &mut Frame, area: Rect, picker: &FilePicker, focused: bool) {
    let block = Block::default()
        .title(format!(" {} Choose Image ", Icons::FOLDER))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let mut header = vec![Span::styled(
        picker.dir().display().to_string(),
        Theme::text_secondary(),
    )];
    if picker.show_hidden() {
        header.push(Span::styled(" (hidden shown)", Theme::text_dim()));
    }
    let mut lines = vec![Line::from(header)];

    let rows = inner.height.saturating_sub(1) as usize;
    if picker.entries().is_empty() {
        lines.push(Line::from(Span::styled("(empty)", Theme::text_dim())));
    } else if rows > 0 {
        let offset = scroll_offset(picker.selected_index(), rows);
        for (index, entry) in picker.entries().iter().enumerate().skip(offset).take(rows) {
            let (icon, style) = match entry.kind {
                EntryKind::Parent => (Icons::PARENT, Theme::directory()),
                EntryKind::Directory => (Icons::FOLDER, Theme::directory()),
                EntryKind::Image => (Icons::IMAGE, Theme::image_file()),
            };

            let (marker, style) = if index == picker.selected_index() {
                (Icons::SELECTED, Theme::selected())
            } else {
                (" ", style)
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(format!("{} {}", icon, entry.name), style),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// First visible row so that `selected` stays on screen
fn scroll_offset(selected: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    selected.saturating_sub(rows - 1)
}
