use super::layout::ChartLayout;
use super::scale::{LinearScale, TimeScale};
use super::zoom::ZoomTransform;
use crate::constants::ROUTE_LENGTH_KM;
use crate::models::{NormalizationStrategy, PointKind, Train};
use crate::selection::{ChartState, LineState};
use chrono::{Duration, NaiveDateTime};
use std::fmt::Write;

const EMPTY_DOMAIN_HOURS: i64 = 1;
const DEGENERATE_DOMAIN_PADDING_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub x: f64,
    pub y: f64,
    pub kind: Option<PointKind>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainLine {
    pub name: String,
    pub color: &'static str,
    /// SVG path data
    pub path: String,
    pub state: LineState,
    /// Marker at the last drawn point
    pub head: Option<(f64, f64)>,
    pub markers: Vec<StationMarker>,
}

impl TrainLine {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == LineState::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowLine {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

/// Everything the drawing layer needs, already in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub width: f64,
    pub height: f64,
    /// Screen y of the time axis
    pub x_axis_y: f64,
    /// Screen x of the distance axis
    pub y_axis_x: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub lines: Vec<TrainLine>,
    pub now_line: Option<NowLine>,
}

/// Inputs of one render
pub struct SceneInput<'a> {
    pub layout: ChartLayout,
    pub state: &'a ChartState,
    pub transform: ZoomTransform,
    pub now: NaiveDateTime,
    pub strategy: NormalizationStrategy,
}

/// Earliest and latest time over the points of `trains`, restricted to points
/// at or before `cutoff` when given
///
/// No points gives the hour before `now`; a single instant is padded on both sides.
#[must_use]
pub fn time_domain(
    trains: &[Train],
    cutoff: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let mut times = trains.iter().flat_map(|t| t.points_until(cutoff)).map(|p| p.time);
    let Some(first) = times.next() else {
        return (now - Duration::hours(EMPTY_DOMAIN_HOURS), now);
    };
    let (min, max) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if min == max {
        let pad = Duration::minutes(DEGENERATE_DOMAIN_PADDING_MINUTES);
        return (min - pad, max + pad);
    }
    (min, max)
}

/// Base scales for the visible trains before any zoom
#[must_use]
pub fn base_scales(input: &SceneInput) -> (TimeScale, LinearScale) {
    let cutoff = input.strategy.is_live().then_some(input.now);
    let domain = time_domain(input.state.visible(), cutoff, input.now);
    let x = TimeScale::new(domain, input.layout.x_range());
    let y = LinearScale::new((0.0, ROUTE_LENGTH_KM), input.layout.y_range());
    (x, y)
}

fn line_for(
    train: &Train,
    color: &'static str,
    state: LineState,
    cutoff: Option<NaiveDateTime>,
    x: &TimeScale,
    y: &LinearScale,
) -> TrainLine {
    let mut path = String::new();
    let mut head = None;
    let mut markers = Vec::new();

    for point in train.points_until(cutoff) {
        let px = x.map(point.time);
        let py = y.map(point.distance);
        let command = if path.is_empty() { 'M' } else { 'L' };
        let _ = write!(path, "{command}{px:.2},{py:.2}");
        head = Some((px, py));

        if let Some(title) = point.marker_title() {
            markers.push(StationMarker { x: px, y: py, kind: point.kind, title });
        }
    }

    TrainLine {
        name: train.id.clone(),
        color,
        path,
        state,
        head,
        markers,
    }
}

/// Project the visible trains through the zoomed scales
///
/// Hidden lines stay in the scene, flagged, so the drawing layer can keep
/// their elements and colours stable.
#[must_use]
pub fn build_scene(input: &SceneInput) -> ChartScene {
    let (base_x, base_y) = base_scales(input);
    let x = input.transform.rescale_x(&base_x);
    let y = input.transform.rescale_y(&base_y);
    let cutoff = input.strategy.is_live().then_some(input.now);

    let x_ticks = x
        .tick_labels(input.layout.x_tick_count())
        .into_iter()
        .map(|(t, label)| AxisTick { position: x.map(t), label })
        .collect();
    let y_ticks = y
        .tick_labels(input.layout.y_tick_count())
        .into_iter()
        .map(|(d, label)| AxisTick { position: y.map(d), label })
        .collect();

    let lines = input
        .state
        .visible()
        .iter()
        .enumerate()
        .map(|(i, train)| {
            let state = input.state.line_state(&train.id);
            line_for(train, ChartState::color_of(i), state, cutoff, &x, &y)
        })
        .collect();

    let now_line = input.strategy.is_live().then(|| NowLine {
        x: x.map(input.now),
        y_top: y.map(ROUTE_LENGTH_KM),
        y_bottom: y.map(0.0),
    });

    let layout = input.layout;
    ChartScene {
        width: layout.width,
        height: layout.height,
        x_axis_y: layout.y_range().0,
        y_axis_x: layout.x_range().0,
        x_range: layout.x_range(),
        y_range: layout.y_range(),
        x_ticks,
        y_ticks,
        lines,
        now_line,
    }
}
