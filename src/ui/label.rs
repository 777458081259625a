//! Floating section label overlay.
//!
//! Applies a [`LabelFrame`]: the label rests on the area's center row and is
//! displaced by the frame's offset (positive = down).

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::animator::LabelFrame;

pub struct LabelOverlay<'a> {
    frame: &'a LabelFrame,
    style: Style,
}

impl<'a> LabelOverlay<'a> {
    pub fn new(frame: &'a LabelFrame, style: Style) -> Self {
        Self { frame, style }
    }
}

/// Screen row for a label displaced `offset_px` rows from the center of
/// `area`, or `None` if that falls outside it.
pub fn label_row(area: Rect, offset_px: f64) -> Option<u16> {
    if area.height == 0 {
        return None;
    }
    let center = i64::from(area.y + area.height / 2);
    let row = center + offset_px.round() as i64;
    if row < i64::from(area.top()) || row >= i64::from(area.bottom()) {
        return None;
    }
    u16::try_from(row).ok()
}

impl Widget for LabelOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.frame.visible {
            return;
        }
        let Some(y) = label_row(area, self.frame.offset_px) else {
            return;
        };

        let text = format!(" {} ", self.frame.title);
        let max = area.width as usize;
        let len = text.chars().count().min(max) as u16;
        let x = area.x + (area.width - len) / 2;
        buf.set_stringn(x, y, &text, max, self.style);
    }
}
