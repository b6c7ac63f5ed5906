/// Default distance from the bottom within which the console keeps following output.
pub const AUTOSCROLL_THRESHOLD_PX: f32 = 60.0;

/// Scroll geometry of the console region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top of the content.
    pub scroll_top: f32,
    /// Visible height of the region.
    pub viewport_height: f32,
    /// Total height of the content.
    pub content_height: f32,
}

impl ScrollMetrics {
    /// Whether the view is close enough to the bottom to follow new output.
    ///
    /// A single distance check; no "user scrolled up" flag is kept.
    pub fn should_stick_to_bottom(&self, threshold: f32) -> bool {
        self.scroll_top + self.viewport_height > self.content_height - threshold
    }

    /// Remaining distance between the bottom of the viewport and the end of the content.
    pub fn distance_from_bottom(&self) -> f32 {
        (self.content_height - self.scroll_top - self.viewport_height).max(0.0)
    }
}
