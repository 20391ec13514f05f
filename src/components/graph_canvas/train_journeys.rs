use crate::chart::{ChartScene, StationMarker, TrainLine};
use crate::models::PointKind;
use crate::selection::LineState;
use leptos::{view, CollectView, IntoView, SignalSet, WriteSignal};

const LINE_WIDTH: f64 = 2.0;
const SELECTED_LINE_WIDTH: f64 = 3.0;
const STATION_MARKER_RADIUS: f64 = 5.0;
const HEAD_MARKER_RADIUS: f64 = 4.0;
const ARRIVAL_COLOR: &str = "green";
const DEPARTURE_COLOR: &str = "blue";

/// Tooltip text with its screen anchor
pub type HoveredMarker = Option<(String, f64, f64)>;

fn marker_color(kind: Option<PointKind>) -> &'static str {
    match kind {
        Some(PointKind::Arrival) => ARRIVAL_COLOR,
        Some(PointKind::Departure) | None => DEPARTURE_COLOR,
    }
}

fn draw_station_marker(marker: &StationMarker, set_hovered: WriteSignal<HoveredMarker>) -> impl IntoView {
    let title = marker.title.clone();
    let (x, y) = (marker.x, marker.y);

    view! {
        <circle
            class="station-marker"
            cx=x.to_string()
            cy=y.to_string()
            r=STATION_MARKER_RADIUS.to_string()
            fill=marker_color(marker.kind)
            on:mouseenter=move |_| set_hovered.set(Some((title.clone(), x, y)))
            on:mouseleave=move |_| set_hovered.set(None)
        ></circle>
    }
}

/// The group carries `data-train` so pointer handlers can tell which line was hit
fn draw_train_line(line: &TrainLine, set_hovered: WriteSignal<HoveredMarker>) -> impl IntoView {
    let stroke_width = if line.state == LineState::VisibleSelected {
        SELECTED_LINE_WIDTH
    } else {
        LINE_WIDTH
    };
    // Hidden lines keep their elements so list colours and positions stay stable
    let display = line.is_hidden().then_some("none");

    let markers = line
        .markers
        .iter()
        .map(|marker| draw_station_marker(marker, set_hovered))
        .collect_view();

    let head = line.head.map(|(x, y)| {
        view! {
            <circle
                class="train-head"
                cx=x.to_string()
                cy=y.to_string()
                r=HEAD_MARKER_RADIUS.to_string()
                fill=line.color
            ></circle>
        }
    });

    view! {
        <g class="train-line" data-train=line.name.clone() display=display>
            <path
                d=line.path.clone()
                fill="none"
                stroke=line.color
                stroke-width=stroke_width.to_string()
                style="cursor: pointer;"
            ></path>
            {markers}
            {head}
        </g>
    }
}

/// One group per train line, in visible-list order
pub fn draw_train_journeys(scene: &ChartScene, set_hovered: WriteSignal<HoveredMarker>) -> impl IntoView {
    let lines = scene
        .lines
        .iter()
        .map(|line| draw_train_line(line, set_hovered))
        .collect_view();

    view! { <g class="train-lines">{lines}</g> }
}
