//! Section and subsection detection.
//!
//! Section detection maps a scroll offset to a slide index.  The scan order and
//! the boundary used depend on the direction of travel, which leaves a dead
//! zone of `ENTER_THRESHOLD × width` around each boundary: jitter near a
//! boundary keeps the current slide instead of flipping back and forth.
//!
//! * forward  — ascending scan, first slide whose `prefix + width × 0.9` has
//!   not been passed yet; the last slide when all have been passed.
//! * backward — descending scan, first slide whose `prefix − width × 0.1` has
//!   been reached; slide 0 when none has.

use super::geometry::Geometry;
use super::layout::LayoutCache;

/// Fraction of a slide's width used as the hysteresis margin.
pub const ENTER_THRESHOLD: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The last offset seen, used only to derive the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    last_offset: f64,
}

impl ScrollState {
    pub fn new(initial_offset: f64) -> Self {
        Self {
            last_offset: initial_offset,
        }
    }

    /// Direction from the previous offset to `offset`.  Records `offset`.
    pub fn advance(&mut self, offset: f64) -> ScrollDirection {
        let direction = if offset >= self.last_offset {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        };
        self.last_offset = offset;
        direction
    }

    #[cfg(test)]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }
}

/// Direction-aware section detector.
#[derive(Debug, Clone)]
pub struct SectionDetector {
    state: ScrollState,
    threshold: f64,
}

impl SectionDetector {
    pub fn new(initial_offset: f64) -> Self {
        Self {
            state: ScrollState::new(initial_offset),
            threshold: ENTER_THRESHOLD,
        }
    }

    /// Active slide index for `offset`.  Always in range for a non-empty
    /// cache; 0 for an empty one.
    pub fn detect(&mut self, offset: f64, cache: &LayoutCache) -> usize {
        match self.state.advance(offset) {
            ScrollDirection::Forward => scan_forward(offset, cache, self.threshold),
            ScrollDirection::Backward => scan_backward(offset, cache, self.threshold),
        }
    }

    #[cfg(test)]
    pub fn last_offset(&self) -> f64 {
        self.state.last_offset()
    }
}

/// First slide whose end marker lies beyond `offset`, else the last slide.
pub fn scan_forward(offset: f64, cache: &LayoutCache, threshold: f64) -> usize {
    (0..cache.len())
        .find(|&i| offset < cache.prefix(i) + cache.width(i) * (1.0 - threshold))
        .unwrap_or_else(|| cache.len().saturating_sub(1))
}

/// Highest slide whose start marker `offset` has reached, else slide 0.
pub fn scan_backward(offset: f64, cache: &LayoutCache, threshold: f64) -> usize {
    (0..cache.len())
        .rev()
        .find(|&i| offset >= cache.prefix(i) - cache.width(i) * threshold)
        .unwrap_or(0)
}

/// The subsection of `slide` whose midpoint sits closest to the viewport's
/// horizontal centre.  Ties go to the earliest registered subsection.
pub fn detect_subsection(
    geometry: &impl Geometry,
    slide: usize,
    scroll_offset: f64,
) -> Option<String> {
    let center = geometry.viewport_width() / 2.0;
    let mut closest: Option<(String, f64)> = None;

    for sub in geometry.subsections() {
        if sub.slide != slide {
            continue;
        }
        let mid = sub.extent.midpoint() - scroll_offset;
        let dist = (center - mid).abs();
        let better = closest.as_ref().is_none_or(|(_, best)| dist < *best);
        if better {
            closest = Some((sub.id, dist));
        }
    }

    closest.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::fixture::StaticGeometry;
    use proptest::prelude::*;

    fn two_slides() -> LayoutCache {
        LayoutCache::from_widths([1000.0, 1000.0])
    }

    #[test]
    fn forward_crossover_is_ninety_percent_of_width() {
        let cache = two_slides();
        let crossover = cache.prefix(0) + cache.width(0) * (1.0 - ENTER_THRESHOLD);
        assert_eq!(crossover, 900.0);

        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(850.0, &cache), 0);
        assert_eq!(detector.detect(crossover - 1e-9, &cache), 0);
        assert_eq!(detector.detect(crossover, &cache), 1);
    }

    #[test]
    fn forward_jump_past_crossover_switches() {
        let cache = two_slides();
        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(850.0, &cache), 0);
        assert_eq!(detector.detect(950.0, &cache), 1);
    }

    #[test]
    fn backward_leaves_slide_ten_percent_before_its_start() {
        let cache = two_slides();
        let mut detector = SectionDetector::new(1500.0);
        assert_eq!(detector.detect(1200.0, &cache), 1);
        assert_eq!(detector.detect(950.0, &cache), 1);
        assert_eq!(detector.detect(900.0, &cache), 1);
        assert_eq!(detector.detect(899.0, &cache), 0);
    }

    #[test]
    fn dead_zone_holds_in_both_directions() {
        let cache = two_slides();

        // Forward into the zone just below the boundary: still slide 0.
        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(880.0, &cache), 0);

        // Backward into the zone just past the boundary: still slide 1.
        let mut detector = SectionDetector::new(1500.0);
        assert_eq!(detector.detect(920.0, &cache), 1);
        assert_eq!(detector.detect(910.0, &cache), 1);
    }

    #[test]
    fn equal_offset_counts_as_forward() {
        let cache = two_slides();
        let mut detector = SectionDetector::new(950.0);
        // 950 >= 950 → forward scan → already past slide 0's end.
        assert_eq!(detector.detect(950.0, &cache), 1);
    }

    #[test]
    fn out_of_range_offsets_clamp() {
        let cache = LayoutCache::from_widths([100.0, 100.0, 100.0]);
        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(10_000.0, &cache), 2);
        assert_eq!(detector.detect(-500.0, &cache), 0);
    }

    #[test]
    fn empty_cache_yields_zero_and_still_tracks_offset() {
        let cache = LayoutCache::default();
        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(42.0, &cache), 0);
        assert_eq!(detector.last_offset(), 42.0);
        assert_eq!(detector.detect(10.0, &cache), 0);
    }

    #[test]
    fn zero_width_slides_never_panic() {
        let cache = LayoutCache::from_widths([0.0, 0.0, 0.0]);
        let mut detector = SectionDetector::new(0.0);
        assert_eq!(detector.detect(0.0, &cache), 2);
        assert_eq!(detector.detect(-1.0, &cache), 0);
    }

    #[test]
    fn subsection_closest_to_center_wins() {
        // Midpoints at 100, 400 and 700; viewport centre at 420.
        let geometry = StaticGeometry::new(840.0)
            .slide("two", 840.0)
            .subsection("posters", 0, 50.0, 100.0)
            .subsection("logos", 0, 350.0, 100.0)
            .subsection("stickers", 0, 650.0, 100.0);
        assert_eq!(
            detect_subsection(&geometry, 0, 0.0).as_deref(),
            Some("logos")
        );
    }

    #[test]
    fn subsection_uses_viewport_relative_midpoints() {
        let geometry = StaticGeometry::new(200.0)
            .slide("a", 200.0)
            .slide("b", 600.0)
            .subsection("near", 1, 250.0, 100.0)
            .subsection("far", 1, 550.0, 100.0);
        // Scrolled so that the viewport spans 500..700, centre at page 600.
        assert_eq!(detect_subsection(&geometry, 1, 500.0).as_deref(), Some("far"));
        assert_eq!(detect_subsection(&geometry, 1, 200.0).as_deref(), Some("near"));
    }

    #[test]
    fn subsection_ties_resolve_to_first_registered() {
        let geometry = StaticGeometry::new(400.0)
            .slide("a", 400.0)
            .subsection("left", 0, 100.0, 50.0)
            .subsection("right", 0, 250.0, 50.0);
        // Midpoints 125 and 275, both 75 away from 200.
        assert_eq!(detect_subsection(&geometry, 0, 0.0).as_deref(), Some("left"));
    }

    #[test]
    fn subsection_ignores_other_slides() {
        let geometry = StaticGeometry::new(400.0)
            .slide("a", 400.0)
            .slide("b", 400.0)
            .subsection("elsewhere", 1, 180.0, 40.0);
        assert_eq!(detect_subsection(&geometry, 0, 0.0), None);
        assert_eq!(
            detect_subsection(&geometry, 1, 0.0).as_deref(),
            Some("elsewhere")
        );
    }

    proptest! {
        #[test]
        fn detect_is_always_in_range(
            widths in prop::collection::vec(0.0f64..2000.0, 1..8),
            offsets in prop::collection::vec(-500.0f64..20_000.0, 1..40),
        ) {
            let cache = LayoutCache::from_widths(widths);
            let mut detector = SectionDetector::new(0.0);
            for offset in offsets {
                prop_assert!(detector.detect(offset, &cache) < cache.len());
            }
        }

        #[test]
        fn forward_sweep_is_monotone_and_reaches_last(
            widths in prop::collection::vec(1.0f64..2000.0, 1..8),
            step in 1.0f64..150.0,
        ) {
            let cache = LayoutCache::from_widths(widths);
            let total = cache.total_width();
            let mut detector = SectionDetector::new(0.0);
            let mut previous = 0;
            let mut offset = 0.0;
            while offset <= total {
                let index = detector.detect(offset, &cache);
                prop_assert!(index >= previous);
                previous = index;
                offset += step;
            }
            prop_assert_eq!(detector.detect(total, &cache), cache.len() - 1);
        }

        #[test]
        fn backward_sweep_is_monotone_and_reaches_first(
            widths in prop::collection::vec(100.0f64..500.0, 1..8),
            step in 1.0f64..150.0,
        ) {
            let cache = LayoutCache::from_widths(widths);
            let total = cache.total_width();
            let mut detector = SectionDetector::new(total + 1.0);
            let mut previous = cache.len() - 1;
            let mut offset = total;
            while offset > 0.0 {
                let index = detector.detect(offset, &cache);
                prop_assert!(index <= previous);
                previous = index;
                offset -= step;
            }
            prop_assert_eq!(detector.detect(0.0, &cache), 0);
        }
    }
}
