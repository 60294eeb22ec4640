//! Scroll controller — the single owner of all page-effect state.
//!
//! Event handlers hold a `&mut ScrollController` and feed it raw events:
//!
//! * `on_scroll` for every scroll offset change (cheap: records the offset,
//!   pokes the footer, refreshes the sticky title),
//! * `on_frame` once per rendered frame (runs at most one detection pass with
//!   the latest offset),
//! * `on_layout_change` after resize / load (rebuild cache, detect once),
//! * `on_timers` when [`ScrollController::next_deadline`] has passed.

use std::time::Instant;

use super::detect::SectionDetector;
use super::geometry::Geometry;
use super::labels::LabelTable;
use super::layout::LayoutCache;
use super::presenter::{ActiveState, PageView, Presenter};
use super::timer::{PageTimer, TimerQueue};

/// Where a scroll offset was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// The page's own scroll container.
    Container,
    /// The outer window, used only when the page has no container.  The
    /// terminal host always has one, so only embedders without a scroll pane
    /// send this.
    #[allow(dead_code)]
    Window,
}

/// Coalesces any number of scroll events into one pass per frame.
#[derive(Debug, Clone, Default)]
pub struct FramePump {
    pending: Option<f64>,
}

impl FramePump {
    /// Record `offset`.  Returns `true` if this is the first event since the
    /// last flush, i.e. a frame pass needs to be requested.
    pub fn request(&mut self, offset: f64) -> bool {
        self.pending.replace(offset).is_none()
    }

    /// Latest recorded offset, clearing the pending flag.
    pub fn flush(&mut self) -> Option<f64> {
        self.pending.take()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug)]
pub struct ScrollController {
    has_container: bool,
    cache: LayoutCache,
    detector: SectionDetector,
    pump: FramePump,
    presenter: Presenter,
    timers: TimerQueue<PageTimer>,
    active_index: Option<usize>,
}

impl ScrollController {
    pub fn new(presenter: Presenter, initial_offset: f64, has_container: bool) -> Self {
        if !has_container {
            tracing::info!("no scroll container; following window scroll instead");
        }
        Self {
            has_container,
            cache: LayoutCache::default(),
            detector: SectionDetector::new(initial_offset),
            pump: FramePump::default(),
            presenter,
            timers: TimerQueue::new(),
            active_index: None,
        }
    }

    fn accepts(&self, source: ScrollSource) -> bool {
        match source {
            ScrollSource::Container => self.has_container,
            ScrollSource::Window => !self.has_container,
        }
    }

    /// Raw scroll event.  Returns `true` when a frame pass became pending.
    pub fn on_scroll(
        &mut self,
        source: ScrollSource,
        offset: f64,
        now: Instant,
        geometry: &impl Geometry,
    ) -> bool {
        if !self.accepts(source) {
            return false;
        }
        let requested = self.pump.request(offset);

        if let Some(footer) = self.presenter.view_mut().footer.as_mut() {
            footer.on_scroll(now, &mut self.timers);
        }
        self.presenter.refresh_subsection(geometry, offset);
        requested
    }

    /// Animation-frame boundary.  Returns `true` if a detection pass ran.
    pub fn on_frame(&mut self, now: Instant, geometry: &impl Geometry) -> bool {
        let Some(offset) = self.pump.flush() else {
            return false;
        };
        self.detect(offset, now, geometry);
        true
    }

    /// Geometry may have changed: rebuild the cache and re-run detection.
    pub fn on_layout_change(&mut self, offset: f64, now: Instant, geometry: &impl Geometry) {
        self.cache.rebuild(geometry);
        self.detect(offset, now, geometry);
    }

    /// Run every timer due at `now`, including follow-ups that are already
    /// due by the time their predecessor runs.
    pub fn on_timers(&mut self, now: Instant) {
        while let Some(due) = self.timers.pop_due(now) {
            let view = self.presenter.view_mut();
            match due.payload {
                PageTimer::MarqueeSwap { slot, text } => {
                    view.marquee.swap(slot, text, due.at, &mut self.timers);
                }
                PageTimer::MarqueeSettle { slot } => view.marquee.settle(slot),
                PageTimer::FooterHide => {
                    if let Some(footer) = view.footer.as_mut() {
                        if footer.on_hide(due.id) {
                            tracing::debug!("footer hidden");
                        }
                    }
                }
            }
        }
    }

    fn detect(&mut self, offset: f64, now: Instant, geometry: &impl Geometry) {
        if self.cache.is_empty() {
            return;
        }
        let index = self.detector.detect(offset, &self.cache);
        let Some(id) = geometry.slide_id(index) else {
            return;
        };
        self.active_index = Some(index);
        self.presenter
            .apply_section(id, geometry, offset, now, &mut self.timers);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[cfg(test)]
    pub fn frame_pending(&self) -> bool {
        self.pump.is_pending()
    }

    pub fn view(&self) -> &PageView {
        self.presenter.view()
    }

    pub fn active(&self) -> &ActiveState {
        self.presenter.active()
    }

    pub fn labels(&self) -> &LabelTable {
        self.presenter.labels()
    }

    /// Index of the last detected slide.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn layout(&self) -> &LayoutCache {
        &self.cache
    }
}
