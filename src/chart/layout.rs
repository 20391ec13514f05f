use crate::constants::{
    MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, SIDE_PANEL_WIDTH, X_TICK_SPACING, Y_TICK_SPACING,
};

/// Pixel geometry of the chart surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Chart sized to the window minus the side panel
    #[must_use]
    pub fn from_viewport(window_width: f64, window_height: f64) -> Self {
        Self::new(window_width - SIDE_PANEL_WIDTH, window_height)
    }

    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0)
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0)
    }

    /// Left to right
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (MARGIN_LEFT, MARGIN_LEFT + self.inner_width())
    }

    /// Bottom to top, so distance grows upwards
    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (MARGIN_TOP + self.inner_height(), MARGIN_TOP)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn x_tick_count(&self) -> usize {
        (self.inner_width() / X_TICK_SPACING).floor().max(1.0) as usize
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn y_tick_count(&self) -> usize {
        (self.inner_height() / Y_TICK_SPACING).floor().max(1.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_viewport_reserves_side_panel() {
        let layout = ChartLayout::from_viewport(1200.0, 800.0);
        assert_eq!(layout.width, 1000.0);
        assert_eq!(layout.height, 800.0);
        assert_eq!(layout.x_range(), (40.0, 970.0));
        assert_eq!(layout.y_range(), (770.0, 20.0));
    }

    #[test]
    fn test_tiny_viewport_does_not_go_negative() {
        let layout = ChartLayout::from_viewport(100.0, 10.0);
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.inner_width(), 0.0);
        assert_eq!(layout.inner_height(), 0.0);
        assert_eq!(layout.x_tick_count(), 1);
    }

    #[test]
    fn test_tick_counts() {
        let layout = ChartLayout::from_viewport(1200.0, 800.0);
        assert_eq!(layout.x_tick_count(), 11);
        assert_eq!(layout.y_tick_count(), 15);
    }
}
