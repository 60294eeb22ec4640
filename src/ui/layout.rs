//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: chrome rows around the scrolling page pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub nav_area: Rect,
    pub marquee_area: Rect,
    pub title_area: Rect,
    pub page_area: Rect,
    pub footer_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // nav bar
                Constraint::Length(1), // marquee
                Constraint::Length(1), // sticky title
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // floating footer
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            marquee_area: chunks[1],
            title_area: chunks[2],
            page_area: chunks[3],
            footer_area: chunks[4],
        }
    }
}
