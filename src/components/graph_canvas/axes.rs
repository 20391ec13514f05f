use crate::chart::ChartScene;
use leptos::{view, CollectView, IntoView};

const TICK_SIZE: f64 = 6.0;
const TICK_LABEL_GAP: f64 = 3.0;
const AXIS_COLOR: &str = "currentColor";
const AXIS_FONT_SIZE: &str = "10";

/// Time axis along the bottom of the plot
pub fn draw_time_axis(scene: &ChartScene) -> impl IntoView {
    let y = scene.x_axis_y;
    let (x0, x1) = scene.x_range;

    let ticks = scene
        .x_ticks
        .iter()
        .filter(|tick| tick.position >= x0 && tick.position <= x1)
        .map(|tick| {
            view! {
                <g class="tick" transform=format!("translate({},0)", tick.position)>
                    <line stroke=AXIS_COLOR y2=TICK_SIZE.to_string()></line>
                    <text
                        fill=AXIS_COLOR
                        y=(TICK_SIZE + TICK_LABEL_GAP).to_string()
                        dy="0.71em"
                        text-anchor="middle"
                    >
                        {tick.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <g class="x-axis" transform=format!("translate(0,{y})") font-size=AXIS_FONT_SIZE>
            <path class="domain" stroke=AXIS_COLOR fill="none" d=format!("M{x0},0H{x1}")></path>
            {ticks}
        </g>
    }
}

/// Distance axis along the left of the plot
pub fn draw_distance_axis(scene: &ChartScene) -> impl IntoView {
    let x = scene.y_axis_x;
    let (y_bottom, y_top) = scene.y_range;

    let ticks = scene
        .y_ticks
        .iter()
        .filter(|tick| tick.position <= y_bottom && tick.position >= y_top)
        .map(|tick| {
            view! {
                <g class="tick" transform=format!("translate(0,{})", tick.position)>
                    <line stroke=AXIS_COLOR x2=(-TICK_SIZE).to_string()></line>
                    <text
                        fill=AXIS_COLOR
                        x=(-(TICK_SIZE + TICK_LABEL_GAP)).to_string()
                        dy="0.32em"
                        text-anchor="end"
                    >
                        {tick.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <g class="y-axis" transform=format!("translate({x},0)") font-size=AXIS_FONT_SIZE>
            <path class="domain" stroke=AXIS_COLOR fill="none" d=format!("M0,{y_bottom}V{y_top}")></path>
            {ticks}
        </g>
    }
}
