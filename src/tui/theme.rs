//! Theme and Styling
//!
//! Defines colors and styles for the TUI interface.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Primary accent color (violet)
    pub const ACCENT: Color = Color::Rgb(118, 75, 162);

    /// Action color (sky blue)
    pub const ACTION: Color = Color::Rgb(79, 172, 254);

    /// Success color (green)
    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);

    /// Warning color (yellow/amber)
    pub const WARNING: Color = Color::Rgb(251, 191, 36);

    /// Error color (red)
    pub const ERROR: Color = Color::Rgb(239, 68, 68);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 229);
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 161);
    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 82);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(51, 51, 51);
    pub const BORDER_FOCUSED: Color = Color::Rgb(102, 126, 234);

    // === Styles ===

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Secondary/muted text style
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Dimmed text style
    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Title style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading style
    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Default border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border style
    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Highlighted picker row
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .bg(Color::Rgb(38, 38, 38))
            .add_modifier(Modifier::BOLD)
    }

    pub fn directory() -> Style {
        Style::default().fg(Self::ACTION)
    }

    pub fn image_file() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACTION)
            .add_modifier(Modifier::BOLD)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Active/in-progress indicator
    pub fn active() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Complete indicator
    pub fn complete() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Analyze button when it can be pressed
    pub fn button_enabled() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACTION)
            .add_modifier(Modifier::BOLD)
    }

    /// Analyze button when disabled (no file, or busy)
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY).bg(Color::Rgb(64, 64, 64))
    }
}

/// Status and list icons
pub struct Icons;

impl Icons {
    pub const TITLE: &'static str = "🖼️";
    pub const FOLDER: &'static str = "📁";
    pub const IMAGE: &'static str = "▣";
    pub const PARENT: &'static str = "↩";
    pub const SEARCH: &'static str = "🔍";
    pub const SELECTED: &'static str = "▶";
    pub const SPINNER: [&'static str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub fn spinner(frame: usize) -> &'static str {
        Self::SPINNER[frame % Self::SPINNER.len()]
    }
}
