//! Preview Widget
//!
//! Renders the selected file through its preview reference: metadata plus a
//! hex view of the leading bytes. No image decoding.

use crate::controller::Controller;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::fmt::Write as _;

const BYTES_PER_ROW: usize = 16;

/// Render the preview region. Draws nothing if no file is selected.
pub fn render_preview(frame: &mut Frame, area: Rect, controller: &Controller) {
    let (Some(file), Some(preview)) = (controller.selected_file(), controller.preview()) else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} Preview ", Icons::TITLE))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(file.name().to_string(), Theme::heading()),
            Span::styled(
                format!("  {}  {}", file.mime(), human_size(file.len())),
                Theme::text_secondary(),
            ),
        ]),
        Line::from(Span::styled(preview.to_string(), Theme::text_dim())),
    ];

    let rows = inner.height.saturating_sub(lines.len() as u16) as usize;
    if let Some(bytes) = controller.previews().resolve(preview.as_str()) {
        let shown = bytes.len().min(rows * BYTES_PER_ROW);
        for line in hex_rows(&bytes[..shown]) {
            lines.push(Line::from(Span::styled(line, Theme::text())));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn hex_rows(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_ROW)
        .enumerate()
        .map(|(row, chunk)| {
            let mut line = format!("{:08x}  ", row * BYTES_PER_ROW);
            for byte in chunk {
                let _ = write!(line, "{:02x} ", byte);
            }
            for _ in chunk.len()..BYTES_PER_ROW {
                line.push_str("   ");
            }
            line.push(' ');
            line.extend(chunk.iter().map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            }));
            line
        })
        .collect()
}

pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
