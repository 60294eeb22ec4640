//! Layout cache — per-slide widths and their running start offsets.
//!
//! Measuring is the expensive part of detection, so widths are taken once and
//! kept here until something can have changed them (resize, load).  The cache
//! is always rebuilt wholesale; it is never patched slide by slide.

use super::geometry::Geometry;

/// Cached slide widths and prefix offsets, indexed by slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutCache {
    widths: Vec<f64>,
    /// `prefix[i]` = sum of `widths[..i]`, i.e. the offset at which slide `i` begins.
    prefix: Vec<f64>,
}

impl LayoutCache {
    /// Build a cache straight from known widths.
    pub fn from_widths(widths: impl IntoIterator<Item = f64>) -> Self {
        let mut cache = Self::default();
        cache.fill(widths.into_iter().map(sanitize).collect());
        cache
    }

    /// Re-measure every slide and recompute all prefixes.
    pub fn rebuild(&mut self, geometry: &impl Geometry) {
        *self = Self::from_widths(
            (0..geometry.slide_count()).map(|i| geometry.measure_slide(i).unwrap_or(0.0)),
        );
        tracing::debug!(
            "layout cache rebuilt: {} slides, {:.1} total",
            self.len(),
            self.total_width()
        );
    }

    fn fill(&mut self, widths: Vec<f64>) {
        let mut acc = 0.0;
        self.prefix = widths
            .iter()
            .map(|&w| {
                let start = acc;
                acc += w;
                start
            })
            .collect();
        self.widths = widths;
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn width(&self, index: usize) -> f64 {
        self.widths.get(index).copied().unwrap_or(0.0)
    }

    pub fn prefix(&self, index: usize) -> f64 {
        self.prefix.get(index).copied().unwrap_or(0.0)
    }

    pub fn total_width(&self) -> f64 {
        self.widths.iter().sum()
    }
}

/// Unmeasurable sizes contribute nothing to the offset math.
fn sanitize(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::fixture::StaticGeometry;

    #[test]
    fn prefixes_accumulate_left_to_right() {
        let cache = LayoutCache::from_widths([300.0, 500.0, 200.0]);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.prefix(0), 0.0);
        assert_eq!(cache.prefix(1), 300.0);
        assert_eq!(cache.prefix(2), 800.0);
        assert_eq!(cache.total_width(), 1000.0);
    }

    #[test]
    fn unmeasurable_slides_contribute_zero() {
        let geometry = StaticGeometry::new(100.0)
            .slide("a", 100.0)
            .unmeasured_slide("b")
            .slide("c", f64::NAN)
            .slide("d", -40.0)
            .slide("e", 100.0);
        let mut cache = LayoutCache::default();
        cache.rebuild(&geometry);

        assert_eq!(cache.len(), 5);
        assert_eq!(cache.width(1), 0.0);
        assert_eq!(cache.width(2), 0.0);
        assert_eq!(cache.width(3), 0.0);
        assert_eq!(cache.prefix(4), 100.0);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let mut cache = LayoutCache::from_widths([10.0, 10.0, 10.0, 10.0]);
        let geometry = StaticGeometry::new(50.0).slide("a", 50.0).slide("b", 70.0);
        cache.rebuild(&geometry);

        assert_eq!(cache, LayoutCache::from_widths([50.0, 70.0]));
        assert_eq!(cache.prefix(1), 50.0);
    }

    #[test]
    fn out_of_range_reads_are_zero() {
        let cache = LayoutCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.width(3), 0.0);
        assert_eq!(cache.prefix(3), 0.0);
    }
}
