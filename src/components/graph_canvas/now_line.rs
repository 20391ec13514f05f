use crate::chart::ChartScene;
use leptos::{view, IntoView};

const NOW_LINE_COLOR: &str = "black";
const NOW_LINE_WIDTH: &str = "3";
const NOW_LINE_DASH: &str = "5,5";

/// Dashed vertical line at the current time, only present for live data
pub fn draw_now_line(scene: &ChartScene) -> impl IntoView {
    scene.now_line.map(|now| {
        view! {
            <line
                class="now-line"
                x1=now.x.to_string()
                x2=now.x.to_string()
                y1=now.y_bottom.to_string()
                y2=now.y_top.to_string()
                stroke=NOW_LINE_COLOR
                stroke-width=NOW_LINE_WIDTH
                stroke-dasharray=NOW_LINE_DASH
            ></line>
        }
    })
}
