use super::scale::{LinearScale, TimeScale};
use crate::constants::{MAX_ZOOM, MIN_ZOOM};

/// Pan/zoom state of the chart: screen = content * k + (x, y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { k: 1.0, x: 0.0, y: 0.0 };

    #[must_use]
    pub fn invert_x(&self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    #[must_use]
    pub fn invert_y(&self, py: f64) -> f64 {
        (py - self.y) / self.k
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Time scale whose domain is what the transformed view shows
    #[must_use]
    pub fn rescale_x(&self, scale: &TimeScale) -> TimeScale {
        let (r0, r1) = scale.range();
        scale.with_domain_from_range(self.invert_x(r0), self.invert_x(r1))
    }

    #[must_use]
    pub fn rescale_y(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range;
        scale.with_domain_from_range(self.invert_y(r0), self.invert_y(r1))
    }

    /// Zoom by `factor` keeping the screen point `(px, py)` fixed
    #[must_use]
    pub fn zoom_at(self, factor: f64, px: f64, py: f64, viewport: (f64, f64)) -> Self {
        let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let content_x = self.invert_x(px);
        let content_y = self.invert_y(py);
        Self { k, x: px - content_x * k, y: py - content_y * k }.constrain(viewport)
    }

    /// Move the view by a screen-space delta
    #[must_use]
    pub fn pan_by(self, dx: f64, dy: f64, viewport: (f64, f64)) -> Self {
        Self { k: self.k, x: self.x + dx, y: self.y + dy }.constrain(viewport)
    }

    /// Keep the content extent `[0, 0]..viewport` covering the viewport,
    /// or centred in it when zoomed out below 1
    #[must_use]
    pub fn constrain(self, viewport: (f64, f64)) -> Self {
        let (width, height) = viewport;
        let dx0 = self.invert_x(0.0);
        let dx1 = self.invert_x(width) - width;
        let dy0 = self.invert_y(0.0);
        let dy1 = self.invert_y(height) - height;

        let tx = clamp_offset(dx0, dx1);
        let ty = clamp_offset(dy0, dy1);
        Self { k: self.k, x: self.x + self.k * tx, y: self.y + self.k * ty }
    }
}

fn clamp_offset(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let low = d0.min(0.0);
    if low != 0.0 {
        low
    } else {
        d1.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    const VIEWPORT: (f64, f64) = (800.0, 600.0);

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid time")
    }

    #[test]
    fn test_identity_rescale_is_noop() {
        let y = LinearScale::new((0.0, 191.0), (570.0, 20.0));
        assert_eq!(ZoomTransform::IDENTITY.rescale_y(&y), y);
    }

    #[test]
    fn test_zoom_clamps_scale_factor() {
        let t = ZoomTransform::IDENTITY.zoom_at(100.0, 400.0, 300.0, VIEWPORT);
        assert_eq!(t.k, MAX_ZOOM);
        let t = ZoomTransform::IDENTITY.zoom_at(0.01, 400.0, 300.0, VIEWPORT);
        assert_eq!(t.k, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let t = ZoomTransform::IDENTITY.zoom_at(2.0, 400.0, 300.0, VIEWPORT);
        assert!((t.invert_x(400.0) - 400.0).abs() < 1e-9);
        assert!((t.invert_y(300.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_is_clamped_to_content() {
        let t = ZoomTransform::IDENTITY.zoom_at(2.0, 0.0, 0.0, VIEWPORT);
        let panned = t.pan_by(500.0, 500.0, VIEWPORT);
        assert_eq!(panned.x, 0.0);
        assert_eq!(panned.y, 0.0);

        let panned = t.pan_by(-5000.0, -5000.0, VIEWPORT);
        assert_eq!(panned.x, VIEWPORT.0 - VIEWPORT.0 * 2.0);
        assert_eq!(panned.y, VIEWPORT.1 - VIEWPORT.1 * 2.0);
    }

    #[test]
    fn test_pan_at_identity_is_pinned() {
        let t = ZoomTransform::IDENTITY.pan_by(120.0, -40.0, VIEWPORT);
        assert!(t.is_identity());
    }

    #[test]
    fn test_zoomed_out_content_is_centred() {
        let t = ZoomTransform::IDENTITY.zoom_at(0.5, 0.0, 0.0, VIEWPORT);
        assert_eq!(t.k, 0.5);
        assert_eq!(t.x, 200.0);
        assert_eq!(t.y, 150.0);
    }

    #[test]
    fn test_zoom_does_not_change_data_domain() {
        let x = TimeScale::new((at(8, 0), at(12, 0)), (40.0, 770.0));
        let zoomed = ZoomTransform::IDENTITY
            .zoom_at(2.0, 400.0, 300.0, VIEWPORT)
            .pan_by(-100.0, 0.0, VIEWPORT);

        assert_eq!(x.domain(), Some((at(8, 0), at(12, 0))));
        let view = zoomed.rescale_x(&x);
        assert_ne!(view.domain(), x.domain());
        assert_eq!(view.range(), x.range());
    }

    #[test]
    fn test_zoom_back_to_identity_restores_ticks() {
        let x = TimeScale::new((at(8, 0), at(12, 0)), (40.0, 770.0));
        let y = LinearScale::new((0.0, 191.0), (570.0, 20.0));
        let original_x = x.ticks(9);
        let original_y = y.ticks(11);

        let zoomed = ZoomTransform::IDENTITY.zoom_at(2.0, 300.0, 200.0, VIEWPORT);
        assert_ne!(zoomed.rescale_x(&x).ticks(9), original_x);

        let restored = zoomed.zoom_at(0.5, 0.0, 0.0, VIEWPORT);
        assert!(restored.is_identity());
        assert_eq!(restored.rescale_x(&x).ticks(9), original_x);
        assert_eq!(restored.rescale_y(&y).ticks(11), original_y);
    }
}
