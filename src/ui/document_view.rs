//! Widget that draws the visible slice of a [`DocumentLayout`].

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::document::{DocumentLayout, RowKind};

use super::theme::Theme;

/// Created fresh each frame.
pub struct DocumentView<'a> {
    layout: &'a DocumentLayout,
    /// Document row drawn at the top of the area; may be negative or past
    /// the end, in which case those rows are left blank.
    top_row: i64,
    /// Section whose heading is highlighted.
    active: Option<usize>,
}

impl<'a> DocumentView<'a> {
    pub fn new(layout: &'a DocumentLayout, top_row: i64) -> Self {
        Self {
            layout,
            top_row,
            active: None,
        }
    }

    pub fn active(mut self, section: Option<usize>) -> Self {
        self.active = section;
        self
    }
}

impl Widget for DocumentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.layout.rows();

        for dy in 0..area.height {
            let index = self.top_row + i64::from(dy);
            let Some(row) = usize::try_from(index).ok().and_then(|i| rows.get(i)) else {
                continue;
            };
            let style = match row.kind {
                RowKind::Heading if Some(row.section) == self.active => Theme::active_heading_style(),
                RowKind::Heading => Theme::heading_style(),
                RowKind::Body | RowKind::Blank => Theme::body_style(),
            };
            buf.set_stringn(area.x, area.y + dy, &row.text, area.width as usize, style);
        }

        // Resting row of the label: the viewport's center line.
        if area.width > 0 && area.height > 0 {
            let center = area.y + area.height / 2;
            buf.set_string(area.right() - 1, center, "◀", Theme::center_marker_style());
        }
    }
}
