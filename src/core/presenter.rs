//! Presentation updater — applies the detected section to the page surfaces.
//!
//! [`PageView`] is the produced UI state (nav highlight, marquee slots, sticky
//! title, footer).  Optional surfaces are `None` when the page has no such
//! element; updates to them are then skipped.

use std::time::{Duration, Instant};

use super::detect::detect_subsection;
use super::footer::FooterController;
use super::geometry::Geometry;
use super::labels::{sticky_title, LabelTable};
use super::marquee::Marquee;
use super::site::NavLink;
use super::timer::{PageTimer, TimerQueue};

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: String,
    /// Slide id taken from the link's fragment.
    pub target: Option<String>,
    pub active: bool,
}

/// Which optional surfaces exist and how the timed ones behave.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub marquee_slots: usize,
    pub marquee_fade_out: Duration,
    pub marquee_fade_in: Duration,
    pub sticky_title: bool,
    pub footer: Option<Duration>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            marquee_slots: 2,
            marquee_fade_out: Duration::from_millis(500),
            marquee_fade_in: Duration::from_millis(1000),
            sticky_title: true,
            footer: Some(Duration::from_millis(1000)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub nav: Vec<NavItem>,
    pub marquee: Marquee,
    pub sticky_title: Option<String>,
    pub footer: Option<FooterController>,
}

impl PageView {
    pub fn new(nav: &[NavLink], options: &ViewOptions) -> Self {
        Self {
            nav: nav
                .iter()
                .map(|link| NavItem {
                    label: link.label.clone(),
                    target: link.target().map(str::to_string),
                    active: false,
                })
                .collect(),
            marquee: Marquee::new(
                options.marquee_slots,
                options.marquee_fade_out,
                options.marquee_fade_in,
            ),
            sticky_title: options.sticky_title.then(String::new),
            footer: options.footer.map(FooterController::new),
        }
    }

    pub fn footer_visible(&self) -> bool {
        self.footer.as_ref().is_some_and(FooterController::is_visible)
    }

    /// Mark exactly the items targeting `id` as active.
    fn highlight(&mut self, id: &str) {
        for item in &mut self.nav {
            item.active = item.target.as_deref() == Some(id);
        }
    }
}

/// The section (and subsection) currently applied to the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveState {
    pub section: Option<String>,
    pub subsection: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Presenter {
    labels: LabelTable,
    active: ActiveState,
    view: PageView,
}

impl Presenter {
    pub fn new(labels: LabelTable, view: PageView) -> Self {
        Self {
            labels,
            active: ActiveState::default(),
            view,
        }
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PageView {
        &mut self.view
    }

    pub fn active(&self) -> &ActiveState {
        &self.active
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Apply a newly detected section.  Empty or unchanged ids are ignored;
    /// returns `true` when the view was updated.
    pub fn apply_section(
        &mut self,
        id: &str,
        geometry: &impl Geometry,
        scroll_offset: f64,
        now: Instant,
        timers: &mut TimerQueue<PageTimer>,
    ) -> bool {
        if id.is_empty() || self.active.section.as_deref() == Some(id) {
            return false;
        }
        self.active.section = Some(id.to_string());

        let label = self.labels.section_label(id);
        tracing::info!("current slide: {label}");

        self.view.marquee.set_text(&label, now, timers);
        self.view.highlight(id);
        self.refresh_subsection(geometry, scroll_offset);
        true
    }

    /// Re-detect the subsection of the current section and rewrite the sticky
    /// title, whether or not anything changed.
    pub fn refresh_subsection(&mut self, geometry: &impl Geometry, scroll_offset: f64) {
        let Some(section) = self.active.section.clone() else {
            return;
        };
        let slide = (0..geometry.slide_count()).find(|&i| geometry.slide_id(i) == Some(section.as_str()));
        let subsection = slide.and_then(|i| detect_subsection(geometry, i, scroll_offset));

        if subsection != self.active.subsection {
            tracing::debug!("subsection: {:?} -> {:?}", self.active.subsection, subsection);
        }
        self.active.subsection = subsection;

        if let Some(title) = self.view.sticky_title.as_mut() {
            let sub_label = self
                .active
                .subsection
                .as_deref()
                .map(|s| self.labels.subsection_label(s));
            *title = sticky_title(&self.labels.section_label(&section), sub_label.as_deref());
        }
    }
}
