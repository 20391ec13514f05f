use crate::chart::{ChartLayout, ZoomTransform};
use leptos::{
    batch, create_effect, create_signal, Memo, ReadSignal, SignalGet, SignalGetUntracked, SignalSet, WriteSignal,
};

/// Pointer travel in pixels after which a press counts as a drag, not a click
const DRAG_CLICK_THRESHOLD: f64 = 3.0;
const DOUBLE_CLICK_ZOOM: f64 = 2.0;

#[derive(Clone, Copy)]
pub struct ViewportSignals {
    pub transform: ReadSignal<ZoomTransform>,
    pub set_transform: WriteSignal<ZoomTransform>,
    pub is_panning: ReadSignal<bool>,
    pub set_is_panning: WriteSignal<bool>,
    pub last_pointer_pos: ReadSignal<(f64, f64)>,
    pub set_last_pointer_pos: WriteSignal<(f64, f64)>,
    /// Total pointer travel of the current press
    pub drag_distance: ReadSignal<f64>,
    pub set_drag_distance: WriteSignal<f64>,
    /// Finger spread of an ongoing pinch
    pub pinch_spread: ReadSignal<Option<f64>>,
    pub set_pinch_spread: WriteSignal<Option<f64>>,
    /// Train line under the pointer when the press began
    pub pressed_line: ReadSignal<Option<String>>,
    pub set_pressed_line: WriteSignal<Option<String>>,
}

#[must_use]
pub fn create_viewport_signals() -> ViewportSignals {
    let (transform, set_transform) = create_signal(ZoomTransform::IDENTITY);
    let (is_panning, set_is_panning) = create_signal(false);
    let (last_pointer_pos, set_last_pointer_pos) = create_signal((0.0, 0.0));
    let (drag_distance, set_drag_distance) = create_signal(0.0);
    let (pinch_spread, set_pinch_spread) = create_signal(None::<f64>);
    let (pressed_line, set_pressed_line) = create_signal(None::<String>);

    ViewportSignals {
        transform,
        set_transform,
        is_panning,
        set_is_panning,
        last_pointer_pos,
        set_last_pointer_pos,
        drag_distance,
        set_drag_distance,
        pinch_spread,
        set_pinch_spread,
        pressed_line,
        set_pressed_line,
    }
}

/// Begin a press at `(x, y)`, remembering which train line it landed on
pub fn handle_pan_start(x: f64, y: f64, pressed_line: Option<String>, viewport: &ViewportSignals) {
    batch(move || {
        viewport.set_is_panning.set(true);
        viewport.set_last_pointer_pos.set((x, y));
        viewport.set_drag_distance.set(0.0);
        viewport.set_pressed_line.set(pressed_line);
    });
}

pub fn handle_pan_move(x: f64, y: f64, size: (f64, f64), viewport: &ViewportSignals) {
    if !viewport.is_panning.get_untracked() {
        return;
    }

    let (last_x, last_y) = viewport.last_pointer_pos.get_untracked();
    let dx = x - last_x;
    let dy = y - last_y;
    let transform = viewport.transform.get_untracked().pan_by(dx, dy, size);
    let travelled = viewport.drag_distance.get_untracked() + dx.hypot(dy);

    batch(move || {
        viewport.set_transform.set(transform);
        viewport.set_last_pointer_pos.set((x, y));
        viewport.set_drag_distance.set(travelled);
    });
}

pub fn handle_pan_end(viewport: &ViewportSignals) {
    viewport.set_is_panning.set(false);
}

/// End a press over `released_line` and return the train it clicked, if any
///
/// Lines are matched by train name rather than by element, so a press still
/// counts as a click when the chart re-renders underneath it.
pub fn handle_release(released_line: Option<String>, viewport: &ViewportSignals) -> Option<String> {
    let pressed = viewport.pressed_line.get_untracked();
    batch(move || {
        viewport.set_is_panning.set(false);
        viewport.set_pressed_line.set(None);
    });
    if was_dragged(viewport) {
        return None;
    }
    pressed.filter(|name| released_line.as_deref() == Some(name.as_str()))
}

/// Whether the press that just ended moved the view, in which case the
/// following click must not select anything
#[must_use]
pub fn was_dragged(viewport: &ViewportSignals) -> bool {
    viewport.drag_distance.get_untracked() > DRAG_CLICK_THRESHOLD
}

pub fn handle_pinch_start(spread: f64, viewport: &ViewportSignals) {
    batch(move || {
        viewport.set_is_panning.set(false);
        viewport.set_pinch_spread.set(Some(spread));
        viewport.set_drag_distance.set(DRAG_CLICK_THRESHOLD + 1.0);
    });
}

/// Zoom by the change in finger spread, about the pinch centre
pub fn handle_pinch_move(spread: f64, center: (f64, f64), size: (f64, f64), viewport: &ViewportSignals) {
    let Some(previous) = viewport.pinch_spread.get_untracked() else {
        return;
    };
    if previous <= 0.0 || spread <= 0.0 {
        return;
    }

    let transform = viewport
        .transform
        .get_untracked()
        .zoom_at(spread / previous, center.0, center.1, size);

    batch(move || {
        viewport.set_transform.set(transform);
        viewport.set_pinch_spread.set(Some(spread));
    });
}

pub fn handle_pinch_end(viewport: &ViewportSignals) {
    viewport.set_pinch_spread.set(None);
}

/// Double click zooms in at the pointer; with shift it zooms out
pub fn handle_double_click(x: f64, y: f64, zoom_out: bool, size: (f64, f64), viewport: &ViewportSignals) {
    let factor = if zoom_out { 1.0 / DOUBLE_CLICK_ZOOM } else { DOUBLE_CLICK_ZOOM };
    let transform = viewport.transform.get_untracked().zoom_at(factor, x, y, size);
    viewport.set_transform.set(transform);
}

pub fn reset(viewport: &ViewportSignals) {
    if !viewport.transform.get_untracked().is_identity() {
        viewport.set_transform.set(ZoomTransform::IDENTITY);
    }
}

/// Drop any zoom whenever the chart layout changes size
pub fn reset_on_resize(layout: Memo<ChartLayout>, viewport: ViewportSignals) {
    create_effect(move |_| {
        let _ = layout.get();
        reset(&viewport);
    });
}

/// Current transform, tracked
#[must_use]
pub fn current_transform(viewport: &ViewportSignals) -> ZoomTransform {
    viewport.transform.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ZOOM, MIN_ZOOM};
    use leptos::{create_memo, create_runtime};

    const SIZE: (f64, f64) = (1000.0, 800.0);

    #[test]
    fn test_short_press_is_a_click() {
        let runtime = create_runtime();
        let vp = create_viewport_signals();
        handle_pan_start(100.0, 100.0, None, &vp);
        handle_pan_move(101.0, 101.0, SIZE, &vp);
        handle_pan_end(&vp);
        assert!(!was_dragged(&vp));
        runtime.dispose();
    }

    #[test]
    fn test_drag_pans_zoomed_view_and_suppresses_click() {
        let runtime = create_runtime();
        let vp = create_viewport_signals();
        handle_double_click(500.0, 400.0, false, SIZE, &vp);
        let zoomed = vp.transform.get_untracked();
        assert!((zoomed.k - 2.0).abs() < 1e-9);

        handle_pan_start(500.0, 400.0, None, &vp);
        handle_pan_move(520.0, 400.0, SIZE, &vp);
        handle_pan_end(&vp);
        let panned = vp.transform.get_untracked();
        assert!((panned.x - (zoomed.x + 20.0)).abs() < 1e-9);
        assert!(was_dragged(&vp));

        // Moves after release are ignored
        handle_pan_move(900.0, 400.0, SIZE, &vp);
        assert_eq!(vp.transform.get_untracked(), panned);
        runtime.dispose();
    }

    #[test]
    fn test_pinch_stays_within_zoom_extent() {
        let runtime = create_runtime();
        let vp = create_viewport_signals();
        handle_pinch_start(10.0, &vp);
        handle_pinch_move(1000.0, (500.0, 400.0), SIZE, &vp);
        assert!((vp.transform.get_untracked().k - MAX_ZOOM).abs() < 1e-9);
        handle_pinch_move(1.0, (500.0, 400.0), SIZE, &vp);
        assert!((vp.transform.get_untracked().k - MIN_ZOOM).abs() < 1e-9);
        handle_pinch_end(&vp);
        assert!(was_dragged(&vp));

        reset(&vp);
        assert!(vp.transform.get_untracked().is_identity());
        runtime.dispose();
    }

    #[test]
    fn test_click_survives_reprojection_while_zoomed() {
        let runtime = create_runtime();
        let vp = create_viewport_signals();
        handle_double_click(500.0, 400.0, false, SIZE, &vp);

        handle_pan_start(300.0, 300.0, Some("Train A".to_string()), &vp);
        handle_pan_move(301.0, 300.0, SIZE, &vp);
        let zoomed = vp.transform.get_untracked();
        assert!((zoomed.x - (-499.0)).abs() < 1e-9);

        assert_eq!(handle_release(Some("Train A".to_string()), &vp), Some("Train A".to_string()));
        assert!(!vp.is_panning.get_untracked());
        assert_eq!(vp.pressed_line.get_untracked(), None);
        runtime.dispose();
    }

    #[test]
    fn test_release_needs_same_line_and_no_drag() {
        let runtime = create_runtime();
        let vp = create_viewport_signals();

        handle_pan_start(300.0, 300.0, Some("Train A".to_string()), &vp);
        assert_eq!(handle_release(Some("Train B".to_string()), &vp), None);

        handle_pan_start(300.0, 300.0, None, &vp);
        assert_eq!(handle_release(Some("Train A".to_string()), &vp), None);

        handle_double_click(500.0, 400.0, false, SIZE, &vp);
        handle_pan_start(300.0, 300.0, Some("Train A".to_string()), &vp);
        handle_pan_move(340.0, 300.0, SIZE, &vp);
        assert_eq!(handle_release(Some("Train A".to_string()), &vp), None);
        runtime.dispose();
    }

    #[test]
    fn test_resize_resets_zoom() {
        let runtime = create_runtime();
        let (window, set_window) = create_signal((1200.0, 800.0));
        let layout = create_memo(move |_| {
            let (width, height) = window.get();
            ChartLayout::from_viewport(width, height)
        });
        let vp = create_viewport_signals();
        reset_on_resize(layout, vp);

        handle_double_click(500.0, 400.0, false, SIZE, &vp);
        assert!(!vp.transform.get_untracked().is_identity());

        // Same size: memo does not change, zoom is kept
        set_window.set((1200.0, 800.0));
        assert!(!vp.transform.get_untracked().is_identity());

        set_window.set((1400.0, 900.0));
        assert_eq!(vp.transform.get_untracked(), ZoomTransform::IDENTITY);
        runtime.dispose();
    }
}
