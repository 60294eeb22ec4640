//! Geometry capability — the measurements the detectors need from the page.
//!
//! The detectors never look at a rendered page directly.  Whatever hosts the
//! page (the TUI, a test fixture) implements [`Geometry`] and the detection
//! code stays a set of pure functions over these numbers.

/// A horizontal span in page coordinates (columns from the page's left edge).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub left: f64,
    pub width: f64,
}

impl Extent {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn midpoint(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// One registered subsection and the slide that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsectionBox {
    pub id: String,
    /// Index of the containing slide.
    pub slide: usize,
    pub extent: Extent,
}

/// Read-only measurement interface over the page.
pub trait Geometry {
    /// Number of slides, fixed for the lifetime of the page.
    fn slide_count(&self) -> usize;

    /// Identifier of slide `index`, `None` when out of range.
    fn slide_id(&self, index: usize) -> Option<&str>;

    /// Rendered width of slide `index`.  `None` means "could not be measured".
    fn measure_slide(&self, index: usize) -> Option<f64>;

    /// Every registered subsection, in registration order.
    fn subsections(&self) -> Vec<SubsectionBox>;

    /// Width of the visible viewport.
    fn viewport_width(&self) -> f64;
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::{Extent, Geometry, SubsectionBox};

    /// Hand-built geometry for unit tests.
    #[derive(Debug, Clone, Default)]
    pub struct StaticGeometry {
        pub slides: Vec<(String, Option<f64>)>,
        pub subsections: Vec<SubsectionBox>,
        pub viewport: f64,
    }

    impl StaticGeometry {
        pub fn new(viewport: f64) -> Self {
            Self {
                viewport,
                ..Self::default()
            }
        }

        pub fn slide(mut self, id: &str, width: f64) -> Self {
            self.slides.push((id.to_string(), Some(width)));
            self
        }

        pub fn unmeasured_slide(mut self, id: &str) -> Self {
            self.slides.push((id.to_string(), None));
            self
        }

        pub fn subsection(mut self, id: &str, slide: usize, left: f64, width: f64) -> Self {
            self.subsections.push(SubsectionBox {
                id: id.to_string(),
                slide,
                extent: Extent::new(left, width),
            });
            self
        }
    }

    impl Geometry for StaticGeometry {
        fn slide_count(&self) -> usize {
            self.slides.len()
        }

        fn slide_id(&self, index: usize) -> Option<&str> {
            self.slides.get(index).map(|(id, _)| id.as_str())
        }

        fn measure_slide(&self, index: usize) -> Option<f64> {
            self.slides.get(index).and_then(|(_, w)| *w)
        }

        fn subsections(&self) -> Vec<SubsectionBox> {
            self.subsections.clone()
        }

        fn viewport_width(&self) -> f64 {
            self.viewport
        }
    }
}
