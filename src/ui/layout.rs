//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the document pane and a bottom status bar.
pub struct AppLayout {
    pub document_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // document pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            document_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Layout for a terminal of `width` × `height` cells.
    pub fn from_size(width: u16, height: u16) -> Self {
        Self::from_area(Rect::new(0, 0, width, height))
    }
}
