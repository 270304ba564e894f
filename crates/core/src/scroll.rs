//! Near-end detection for an infinitely scrolling list.

/// Default distance from the end, in viewport units, that counts as "near".
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 10.0;

/// Geometry of a scrollable viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Total scrollable extent of the content.
    pub extent: f64,
    /// Current scroll offset from the start.
    pub offset: f64,
    /// Visible extent of the viewport.
    pub visible: f64,
}

impl ScrollMetrics {
    pub fn new(extent: f64, offset: f64, visible: f64) -> Self {
        Self {
            extent,
            offset,
            visible,
        }
    }

    /// Whether the viewport is within `threshold` of the end.
    ///
    /// Fires repeatedly while the condition holds; callers rely on the feed's
    /// loading guard to ignore redundant requests.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.extent - self.offset <= self.visible + threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_end_within_threshold() {
        // 2000 - 1195 = 805 <= 800 + 10
        let metrics = ScrollMetrics::new(2000.0, 1195.0, 800.0);
        assert!(metrics.is_near_end(DEFAULT_SCROLL_THRESHOLD));
    }

    #[test]
    fn test_exactly_on_boundary_counts() {
        let metrics = ScrollMetrics::new(2000.0, 1190.0, 800.0);
        assert!(metrics.is_near_end(10.0));
    }

    #[test]
    fn test_far_from_end() {
        let metrics = ScrollMetrics::new(2000.0, 100.0, 800.0);
        assert!(!metrics.is_near_end(DEFAULT_SCROLL_THRESHOLD));
    }

    #[test]
    fn test_content_shorter_than_viewport() {
        let metrics = ScrollMetrics::new(300.0, 0.0, 800.0);
        assert!(metrics.is_near_end(0.0));
    }
}
