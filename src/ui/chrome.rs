//! Chrome widgets around the page: nav bar, marquee, sticky title, footer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::Theme;
use crate::core::marquee::MarqueeSlot;
use crate::core::presenter::NavItem;

// ───────────────────────────────────────── nav bar ───────────

/// Columns between nav entries.
const NAV_GAP: u16 = 2;

/// Horizontal `(x, width)` of each nav entry when drawn in `area`.
pub fn nav_spans(area: Rect, items: &[NavItem]) -> Vec<(u16, u16)> {
    let mut x = area.x.saturating_add(1);
    items
        .iter()
        .map(|item| {
            let width = item.label.chars().count() as u16 + 2;
            let span = (x, width);
            x = x.saturating_add(width + NAV_GAP);
            span
        })
        .collect()
}

/// Index of the nav entry under column `column`, if any.
pub fn nav_hit_test(area: Rect, items: &[NavItem], column: u16, row: u16) -> Option<usize> {
    if row != area.y {
        return None;
    }
    nav_spans(area, items)
        .iter()
        .position(|&(x, width)| column >= x && column < x.saturating_add(width))
}

pub struct NavBar<'a> {
    pub items: &'a [NavItem],
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (item, (x, width)) in self.items.iter().zip(nav_spans(area, self.items)) {
            if x >= area.right() {
                break;
            }
            let visible = width.min(area.right() - x);
            buf.set_stringn(
                x,
                area.y,
                format!(" {} ", item.label),
                visible as usize,
                Theme::nav_style(item.active),
            );
        }
    }
}

// ───────────────────────────────────────── marquee ───────────

const MARQUEE_SEPARATOR: &str = "  ✦  ";

/// The rotating section label.  Each slot is one repeated segment; `tick`
/// shifts the whole strip one column per frame.
pub struct MarqueeBar<'a> {
    pub slots: &'a [MarqueeSlot],
    pub tick: u64,
}

impl Widget for MarqueeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.slots.is_empty() {
            return;
        }
        // One cell per char so the strip can be rotated by column.
        let strip: Vec<(char, Style)> = self
            .slots
            .iter()
            .flat_map(|slot| {
                let style = Theme::marquee_style(slot.phase);
                slot.text
                    .chars()
                    .chain(MARQUEE_SEPARATOR.chars())
                    .map(move |c| (c, style))
            })
            .collect();
        if strip.is_empty() {
            return;
        }

        let shift = (self.tick % strip.len() as u64) as usize;
        for col in 0..area.width {
            let (c, style) = strip[(shift + col as usize) % strip.len()];
            if let Some(cell) = buf.cell_mut((area.x + col, area.y)) {
                cell.set_char(c).set_style(style);
            }
        }
    }
}

// ───────────────────────────────────────── title / footer ────

pub struct StickyTitleBar<'a> {
    pub text: &'a str,
}

impl Widget for StickyTitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.text),
            Theme::sticky_title_style(),
        )))
        .render(area, buf);
    }
}

/// Footer row with key hints and scroll progress; blank while hidden.
pub struct FooterBar<'a> {
    pub visible: bool,
    pub hint: &'a str,
    /// Scroll progress in `0.0..=1.0`.
    pub progress: f64,
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible {
            return;
        }
        let pct = format!(" {:>3.0}% ", self.progress.clamp(0.0, 1.0) * 100.0);
        Paragraph::new(Line::from(vec![
            Span::raw(format!(" {}", self.hint)),
            Span::raw(" "),
            Span::raw(pct),
        ]))
        .style(Theme::footer_style())
        .render(area, buf);
    }
}
