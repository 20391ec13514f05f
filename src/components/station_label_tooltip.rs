use crate::components::graph_canvas::HoveredMarker;
use leptos::{component, view, IntoView, ReadSignal, SignalGet};

const TOOLTIP_OFFSET_X: f64 = 10.0;
const TOOLTIP_OFFSET_Y: f64 = 30.0;

#[component]
#[must_use]
pub fn StationLabelTooltip(hovered_marker: ReadSignal<HoveredMarker>) -> impl IntoView {
    view! {
        {move || {
            if let Some((title, x, y)) = hovered_marker.get() {
                view! {
                    <div
                        class="station-label-tooltip"
                        style=format!(
                            "left: {}px; top: {}px;",
                            x + TOOLTIP_OFFSET_X,
                            y - TOOLTIP_OFFSET_Y,
                        )
                    >
                        {title}
                    </div>
                }
                    .into_view()
            } else {
                view! { <div class="station-label-tooltip-hidden"></div> }.into_view()
            }
        }}
    }
}
