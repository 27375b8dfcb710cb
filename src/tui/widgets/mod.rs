//! TUI Widgets
//!
//! One render function per region of the main screen.

mod action;
mod picker;
mod preview;
mod result;

pub use action::render_action;
pub use picker::render_picker;
pub use preview::render_preview;
pub use result::render_result;
