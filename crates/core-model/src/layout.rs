//! Screen layout.
//!
//! The terminal is split into a text region on top, then a status row and a
//! message row. Distraction-free mode drops the status row. Region
//! coordinates are terminal cells.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub text: LayoutRegion,
    pub status: Option<LayoutRegion>,
    pub message: Option<LayoutRegion>,
}

impl Layout {
    /// Split a `width x height` screen. Rows are taken from the bottom for the
    /// message line first, then the status line, so a tiny terminal keeps its
    /// text area before anything else disappears.
    pub fn for_screen(width: u16, height: u16, distraction_free: bool) -> Self {
        let reserved: u16 = if distraction_free { 1 } else { 2 };
        let chrome = reserved.min(height.saturating_sub(1));
        let text_h = height - chrome;
        let message = (chrome >= 1).then(|| LayoutRegion::new(0, height - 1, width, 1));
        let status = (!distraction_free && chrome >= 2)
            .then(|| LayoutRegion::new(0, height - 2, width, 1));
        Self {
            text: LayoutRegion::new(0, 0, width, text_h),
            status,
            message,
        }
    }

    pub fn text_rows(&self) -> usize {
        self.text.height as usize
    }

    pub fn text_cols(&self) -> usize {
        self.text.width as usize
    }
}
