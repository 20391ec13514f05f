use leptos::*;
use leptos_use::{use_window_size, UseWindowSizeReturn};
use chrono::NaiveDateTime;
use wasm_bindgen::JsCast;
use web_sys::{DomRect, EventTarget, MouseEvent, TouchEvent};
use crate::chart::{build_scene, ChartLayout, ChartScene, SceneInput};
use crate::components::canvas_viewport;
use crate::components::station_label_tooltip::StationLabelTooltip;
use crate::models::NormalizationStrategy;
use crate::selection::ChartState;
use super::train_journeys::HoveredMarker;
use super::{axes, now_line, train_journeys};

#[cfg(all(target_arch = "wasm32", feature = "perf_timing"))]
fn get_performance() -> Option<web_sys::Performance> {
    web_sys::window().and_then(|window| window.performance())
}

fn timed_build_scene(input: &SceneInput) -> ChartScene {
    #[cfg(all(target_arch = "wasm32", feature = "perf_timing"))]
    let start = get_performance().map(|p| p.now());

    let scene = build_scene(input);

    #[cfg(all(target_arch = "wasm32", feature = "perf_timing"))]
    if let (Some(start), Some(end)) = (start, get_performance().map(|p| p.now())) {
        crate::log!("⏱️ scene built in {:.2}ms ({} lines)", end - start, scene.lines.len());
    }

    scene
}

/// Pointer position relative to the chart container
fn local_point(client_x: i32, client_y: i32, rect: &DomRect) -> (f64, f64) {
    (f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
}

fn touch_points(ev: &TouchEvent, rect: &DomRect) -> Vec<(f64, f64)> {
    let touches = ev.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| local_point(touch.client_x(), touch.client_y(), rect))
        .collect()
}

/// Name of the train line whose group contains `element`
fn train_of(element: &web_sys::Element) -> Option<String> {
    element.closest("[data-train]").ok()??.get_attribute("data-train")
}

fn train_at(target: Option<EventTarget>) -> Option<String> {
    train_of(&target?.dyn_into::<web_sys::Element>().ok()?)
}

/// Train line under a client point; a touch keeps its start element as target
/// even after that element has been re-rendered
#[allow(clippy::cast_precision_loss)]
fn train_at_point(client_x: i32, client_y: i32) -> Option<String> {
    let document = web_sys::window()?.document()?;
    train_of(&document.element_from_point(client_x as f32, client_y as f32)?)
}

/// Finger spread and centre of the first two touches
fn pinch_geometry(points: &[(f64, f64)]) -> Option<(f64, (f64, f64))> {
    let [(x0, y0), (x1, y1), ..] = points else {
        return None;
    };
    let spread = (x1 - x0).hypot(y1 - y0);
    Some((spread, ((x0 + x1) / 2.0, (y0 + y1) / 2.0)))
}

#[component]
#[must_use]
pub fn GraphCanvas(
    chart_state: ReadSignal<ChartState>,
    set_chart_state: WriteSignal<ChartState>,
    now: ReadSignal<NaiveDateTime>,
    strategy: NormalizationStrategy,
) -> impl IntoView {
    let container_ref = create_node_ref::<leptos::html::Div>();
    let (hovered_marker, set_hovered_marker) = create_signal::<HoveredMarker>(None);

    let UseWindowSizeReturn { width, height } = use_window_size();
    let layout = create_memo(move |_| ChartLayout::from_viewport(width.get(), height.get()));

    let viewport = canvas_viewport::create_viewport_signals();

    // A resize rebuilds the chart from scratch, dropping any zoom
    canvas_viewport::reset_on_resize(layout, viewport);
    create_effect(move |_| {
        let _ = layout.get();
        set_hovered_marker.set(None);
    });

    let scene = create_memo(move |_| {
        chart_state.with(|state| {
            timed_build_scene(&SceneInput {
                layout: layout.get(),
                state,
                transform: canvas_viewport::current_transform(&viewport),
                now: now.get(),
                strategy,
            })
        })
    });

    let container_rect = move || -> Option<DomRect> {
        let container = container_ref.get_untracked()?;
        let div: &web_sys::HtmlDivElement = &container;
        Some(div.get_bounding_client_rect())
    };
    let size = move || layout.get_untracked().viewport();

    let select_train = move |name: String| {
        set_chart_state.update(|state| state.select(Some(&name)));
    };

    let handle_mouse_down = move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(rect) = container_rect() {
            let (x, y) = local_point(ev.client_x(), ev.client_y(), &rect);
            canvas_viewport::handle_pan_start(x, y, train_at(ev.target()), &viewport);
        }
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        if let Some(rect) = container_rect() {
            let (x, y) = local_point(ev.client_x(), ev.client_y(), &rect);
            canvas_viewport::handle_pan_move(x, y, size(), &viewport);
        }
    };

    let handle_mouse_up = move |ev: MouseEvent| {
        if let Some(name) = canvas_viewport::handle_release(train_at(ev.target()), &viewport) {
            select_train(name);
        }
    };

    let handle_mouse_leave = move |_ev: MouseEvent| {
        canvas_viewport::handle_pan_end(&viewport);
        set_hovered_marker.set(None);
    };

    let handle_double_click = move |ev: MouseEvent| {
        ev.prevent_default();
        if let Some(rect) = container_rect() {
            let (x, y) = local_point(ev.client_x(), ev.client_y(), &rect);
            canvas_viewport::handle_double_click(x, y, ev.shift_key(), size(), &viewport);
        }
    };

    let handle_touch_start = move |ev: TouchEvent| {
        let Some(rect) = container_rect() else { return };
        let points = touch_points(&ev, &rect);
        if let Some((spread, _)) = pinch_geometry(&points) {
            canvas_viewport::handle_pinch_start(spread, &viewport);
        } else if let Some(&(x, y)) = points.first() {
            canvas_viewport::handle_pan_start(x, y, train_at(ev.target()), &viewport);
        }
    };

    let handle_touch_move = move |ev: TouchEvent| {
        let Some(rect) = container_rect() else { return };
        ev.prevent_default();
        let points = touch_points(&ev, &rect);
        if let Some((spread, center)) = pinch_geometry(&points) {
            canvas_viewport::handle_pinch_move(spread, center, size(), &viewport);
        } else if let Some(&(x, y)) = points.first() {
            canvas_viewport::handle_pan_move(x, y, size(), &viewport);
        }
    };

    let handle_touch_end = move |ev: TouchEvent| {
        let lifted = ev
            .changed_touches()
            .get(0)
            .and_then(|touch| train_at_point(touch.client_x(), touch.client_y()));
        canvas_viewport::handle_pinch_end(&viewport);
        if let Some(name) = canvas_viewport::handle_release(lifted, &viewport) {
            select_train(name);
        }
        // Lifting one finger of a pinch continues as a pan with the other
        let remaining = container_rect().map(|rect| touch_points(&ev, &rect)).unwrap_or_default();
        if let [(x, y)] = remaining[..] {
            canvas_viewport::handle_pan_start(x, y, None, &viewport);
        }
    };

    view! {
        <div
            class="chart-container"
            node_ref=container_ref
            style="position: relative; touch-action: none;"
            on:mousedown=handle_mouse_down
            on:mousemove=handle_mouse_move
            on:mouseup=handle_mouse_up
            on:mouseleave=handle_mouse_leave
            on:dblclick=handle_double_click
            on:touchstart=handle_touch_start
            on:touchmove=handle_touch_move
            on:touchend=handle_touch_end
            on:touchcancel=handle_touch_end
        >
            {move || {
                let scene = scene.get();
                view! {
                    <svg
                        class="train-graph"
                        width=scene.width.to_string()
                        height=scene.height.to_string()
                        style="cursor: grab;"
                    >
                        {axes::draw_time_axis(&scene)}
                        {axes::draw_distance_axis(&scene)}
                        {train_journeys::draw_train_journeys(&scene, set_hovered_marker)}
                        {now_line::draw_now_line(&scene)}
                    </svg>
                }
            }}
            <StationLabelTooltip hovered_marker=hovered_marker />
        </div>
    }
}
