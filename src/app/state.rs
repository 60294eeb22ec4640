//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The page-effect state itself is owned by the [`ScrollController`]; this
//! struct adds what only the terminal host needs (geometry, areas, glide).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::controller::{ScrollController, ScrollSource};
use crate::core::presenter::{PageView, Presenter, ViewOptions};
use crate::core::site::Site;
use crate::ui::layout::AppLayout;
use crate::ui::page::PageLayout;
use crate::ui::smooth_scroll::SmoothScroll;

/// Top-level application state.
pub struct AppState {
    /// Page content.
    pub site: Site,
    /// User configuration (bindings, timings).
    pub config: AppConfig,
    /// Screen regions for the current terminal size.
    pub layout: AppLayout,
    /// Page geometry for the current page-pane width.
    pub page: PageLayout,
    /// Section detection and everything it drives.
    pub controller: ScrollController,
    /// Current scroll position and any glide in progress.
    pub scroll: SmoothScroll,
    /// Frames rendered so far (drives the marquee).
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    /// Build the state for a terminal of `width × height` and run the initial
    /// layout pass (the page's "load").
    pub fn new(
        site: Site,
        config: AppConfig,
        options: &ViewOptions,
        (width, height): (u16, u16),
        now: Instant,
    ) -> Self {
        let mut labels = site.labels.clone();
        labels.merge(&config.labels);
        let presenter = Presenter::new(labels, PageView::new(&site.nav, options));
        let controller = ScrollController::new(presenter, 0.0, true);

        let layout = AppLayout::from_area(Rect::new(0, 0, width, height));
        let page = PageLayout::new(&site, layout.page_area.width);
        let scroll = SmoothScroll::new(config.smooth_scroll_speed, 0.0);

        let mut state = Self {
            site,
            config,
            layout,
            page,
            controller,
            scroll,
            tick: 0,
            should_quit: false,
        };
        state.relayout(now);
        state
    }

    /// Terminal resized: recompute regions and geometry, then re-detect.
    pub fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.layout = AppLayout::from_area(Rect::new(0, 0, width, height));
        self.page = PageLayout::new(&self.site, self.layout.page_area.width);
        self.relayout(now);
    }

    fn relayout(&mut self, now: Instant) {
        let offset = self.clamp(self.scroll.position());
        self.scroll.jump_to(offset);
        self.controller.on_layout_change(offset, now, &self.page);
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.page.max_offset())
    }

    /// Move to `offset` right away (keys, wheel).
    pub fn scroll_to(&mut self, offset: f64, now: Instant) {
        let offset = self.clamp(offset);
        if offset == self.scroll.position() && !self.scroll.is_animating() {
            return;
        }
        self.scroll.jump_to(offset);
        self.controller
            .on_scroll(ScrollSource::Container, offset, now, &self.page);
    }

    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        self.scroll_to(self.scroll.position() + delta, now);
    }

    /// Glide to `offset` over the next frames (section jumps, nav links).
    pub fn glide_to(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.scroll.set_target(offset);
    }

    /// Glide to the start of slide `index`.
    pub fn glide_to_slide(&mut self, index: usize) {
        if index < self.controller.layout().len() {
            self.glide_to(self.controller.layout().prefix(index));
        }
    }

    /// Glide to the slide a nav entry points at.
    pub fn follow_nav(&mut self, nav_index: usize) {
        let target = self
            .controller
            .view()
            .nav
            .get(nav_index)
            .and_then(|item| item.target.as_deref())
            .and_then(|id| self.site.slide_index(id));
        match target {
            Some(index) => self.glide_to_slide(index),
            None => tracing::debug!("nav entry {nav_index} has no slide target"),
        }
    }

    /// One animation frame: advance any glide, then let detection run.
    pub fn on_frame(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        if self.scroll.tick() {
            let offset = self.scroll.position();
            self.controller
                .on_scroll(ScrollSource::Container, offset, now, &self.page);
        }
        self.controller.on_frame(now, &self.page);
    }

    /// Scroll progress in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let max = self.page.max_offset();
        if max <= 0.0 {
            0.0
        } else {
            self.scroll.position() / max
        }
    }
}
