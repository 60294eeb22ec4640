//! The horizontally scrolling page: geometry and rendering.
//!
//! [`PageLayout`] places slides side by side and subsection cards in a row
//! inside their slide; it is what the detectors measure.  [`PageWidget`]
//! draws the whole page into an off-screen buffer and copies the visible
//! window (`offset .. offset + width`) onto the frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::theme::Theme;
use crate::core::geometry::{Extent, Geometry, SubsectionBox};
use crate::core::labels::LabelTable;
use crate::core::site::Site;

/// Width of one subsection card.
pub const CARD_WIDTH: u16 = 26;
/// Gap between neighbouring cards.
pub const CARD_GAP: u16 = 2;
/// Space between a slide's border and its first / last card.
pub const SLIDE_PADDING: u16 = 3;
/// Rows taken by the slide's own text above the cards.
const CARD_TOP: u16 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct SlideBox {
    pub id: String,
    pub extent: Extent,
}

/// Page geometry for one viewport width.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    slides: Vec<SlideBox>,
    subsections: Vec<SubsectionBox>,
    viewport: u16,
}

impl PageLayout {
    /// Lay out `site` for a page pane `viewport` columns wide.
    pub fn new(site: &Site, viewport: u16) -> Self {
        let mut slides = Vec::with_capacity(site.slides.len());
        let mut subsections = Vec::new();
        let mut left: u32 = 0;

        for (index, slide) in site.slides.iter().enumerate() {
            let cards = slide.subsections.len() as u32;
            let row = if cards == 0 {
                0
            } else {
                2 * SLIDE_PADDING as u32 + cards * CARD_WIDTH as u32 + (cards - 1) * CARD_GAP as u32
            };
            let width = row.max(viewport as u32);

            for (k, sub) in slide.subsections.iter().enumerate() {
                let card_left =
                    left + SLIDE_PADDING as u32 + k as u32 * (CARD_WIDTH + CARD_GAP) as u32;
                subsections.push(SubsectionBox {
                    id: sub.id.clone(),
                    slide: index,
                    extent: Extent::new(card_left as f64, CARD_WIDTH as f64),
                });
            }

            slides.push(SlideBox {
                id: slide.id.clone(),
                extent: Extent::new(left as f64, width as f64),
            });
            left += width;
        }

        Self {
            slides,
            subsections,
            viewport,
        }
    }

    pub fn slides(&self) -> &[SlideBox] {
        &self.slides
    }

    /// Full page width in columns, clamped to what a buffer can address.
    pub fn total_width(&self) -> u16 {
        let total = self.slides.last().map_or(0.0, |s| s.extent.right());
        total.min(u16::MAX as f64) as u16
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_offset(&self) -> f64 {
        self.total_width().saturating_sub(self.viewport) as f64
    }

    pub fn viewport(&self) -> u16 {
        self.viewport
    }
}

impl Geometry for PageLayout {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide_id(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(|s| s.id.as_str())
    }

    fn measure_slide(&self, index: usize) -> Option<f64> {
        self.slides.get(index).map(|s| s.extent.width)
    }

    fn subsections(&self) -> Vec<SubsectionBox> {
        self.subsections.clone()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport as f64
    }
}

/// Renders the visible window of the page.
pub struct PageWidget<'a> {
    pub site: &'a Site,
    pub layout: &'a PageLayout,
    pub labels: &'a LabelTable,
    pub offset: f64,
    /// Subsection to draw with a focused card border.
    pub focused: Option<&'a str>,
}

impl PageWidget<'_> {
    fn draw_page(&self, height: u16) -> Buffer {
        let mut page = Buffer::empty(Rect::new(0, 0, self.layout.total_width(), height));

        for (slide, placed) in self.site.slides.iter().zip(self.layout.slides()) {
            let area = clip(placed.extent, 0, height, page.area);
            if area.width < 2 {
                continue;
            }
            let block = Block::default()
                .title(format!(" {} ", self.labels.section_label(&slide.id)))
                .title_style(Theme::slide_title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::slide_border_style());
            let inner = block.inner(area);
            block.render(area, &mut page);

            let body: Vec<Line> = slide
                .lines
                .iter()
                .map(|l| Line::from(Span::styled(format!("  {l}"), Theme::body_style())))
                .collect();
            let body_area = Rect {
                y: inner.y.saturating_add(1),
                ..inner
            }
            .intersection(inner);
            Paragraph::new(body).render(body_area, &mut page);
        }

        let card_height = height.saturating_sub(CARD_TOP + 2).min(10);
        if card_height >= 3 {
            for sub in &self.layout.subsections {
                let Some(lines) = self
                    .site
                    .slides
                    .get(sub.slide)
                    .and_then(|s| s.subsections.iter().find(|c| c.id == sub.id))
                    .map(|c| &c.lines)
                else {
                    continue;
                };
                let focused = self.focused == Some(sub.id.as_str());
                let area = clip(sub.extent, CARD_TOP, card_height, page.area);
                let block = Block::default()
                    .title(format!(" {} ", self.labels.subsection_label(&sub.id)))
                    .title_style(Theme::card_title_style(focused))
                    .borders(Borders::ALL)
                    .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
                    .border_style(Theme::card_border_style(focused));
                let inner = block.inner(area);
                block.render(area, &mut page);
                let text: Vec<Line> = lines.iter().map(|l| Line::raw(format!(" {l}"))).collect();
                Paragraph::new(text).render(inner, &mut page);
            }
        }

        page
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let page = self.draw_page(area.height);
        let offset = self.offset.round().max(0.0) as u16;

        for y in 0..area.height {
            for x in 0..area.width {
                let Some(src) = page.cell((offset.saturating_add(x), y)) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((area.x + x, area.y + y)) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// Page-space extent → buffer rect, clipped to `bounds`.
fn clip(extent: Extent, y: u16, height: u16, bounds: Rect) -> Rect {
    let x = extent.left.max(0.0).min(u16::MAX as f64) as u16;
    let width = extent.width.max(0.0).min(u16::MAX as f64) as u16;
    Rect::new(x, y, width, height).intersection(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::detect::detect_subsection;

    #[test]
    fn slides_without_cards_fill_the_viewport() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 80);
        assert_eq!(layout.measure_slide(0), Some(80.0));
        assert_eq!(layout.measure_slide(3), Some(80.0));
    }

    #[test]
    fn card_rows_widen_their_slide() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 80);
        // Seven cards: 3 + 7×26 + 6×2 + 3.
        assert_eq!(layout.measure_slide(1), Some(200.0));
        assert_eq!(layout.slides()[2].extent.left, 280.0);
    }

    #[test]
    fn cards_sit_inside_their_slide() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 80);
        for sub in layout.subsections() {
            let slide = &layout.slides()[sub.slide].extent;
            assert!(sub.extent.left >= slide.left);
            assert!(sub.extent.right() <= slide.right());
        }
    }

    #[test]
    fn max_offset_leaves_a_full_viewport() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 80);
        let total = 80 + 200 + layout.measure_slide(2).unwrap_or(0.0) as u16 + 80;
        assert_eq!(layout.total_width(), total);
        assert_eq!(layout.max_offset(), (total - 80) as f64);
    }

    #[test]
    fn viewport_centre_picks_the_card_under_it() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 80);
        // First card of "two" starts at 83; centre it (mid 96) in an 80-wide viewport.
        let id = detect_subsection(&layout, 1, 96.0 - 40.0);
        assert_eq!(id.as_deref(), Some("posters"));
    }

    #[test]
    fn widget_copies_the_visible_window() {
        let site = Site::portfolio();
        let layout = PageLayout::new(&site, 40);
        let labels = site.labels.clone();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        PageWidget {
            site: &site,
            layout: &layout,
            labels: &labels,
            offset: 0.0,
            focused: None,
        }
        .render(area, &mut buf);

        let top: String = (0..40u16)
            .filter_map(|x| buf.cell((x, 0u16)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(top.contains("CONTACT ME"), "top row was {top:?}");
    }
}
