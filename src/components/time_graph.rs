use crate::clock::{service_date, use_now};
use crate::components::{
    graph_canvas::GraphCanvas,
    train_details::TrainDetails,
    train_list::TrainList,
};
use crate::constants::CLOCK_REFRESH_MS;
use crate::loader::{load_trains, DataSource};
use crate::logging::log;
use crate::models::Train;
use crate::selection::ChartState;
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

/// Flag that turns false when the current owner is cleaned up
fn use_liveness() -> Rc<Cell<bool>> {
    let alive = Rc::new(Cell::new(true));
    on_cleanup({
        let alive = Rc::clone(&alive);
        move || alive.set(false)
    });
    alive
}

/// Hand loaded trains to the chart, unless it was unmounted while loading
fn apply_loaded_trains(
    alive: &Cell<bool>,
    trains: Vec<Train>,
    set_chart_state: WriteSignal<ChartState>,
    set_is_loading: WriteSignal<bool>,
) -> bool {
    if !alive.get() {
        return false;
    }
    set_chart_state.update(|state| state.replace_trains(trains));
    set_is_loading.set(false);
    true
}

#[component]
pub fn TimeGraph(source: DataSource) -> impl IntoView {
    let (chart_state, set_chart_state) = create_signal(ChartState::default());
    let (is_loading, set_is_loading) = create_signal(true);
    let now = use_now(CLOCK_REFRESH_MS);
    let strategy = source.strategy();

    let alive = use_liveness();

    spawn_local(async move {
        let trains = load_trains(source, service_date()).await;
        let count = trains.len();
        if apply_loaded_trains(&alive, trains, set_chart_state, set_is_loading) {
            log!("Loaded {} trains from {:?} source", count, source);
        }
    });

    view! {
        <div class="time-graph-container">
            <div class="main-content">
                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! { <div class="loading">"Loading trains…"</div> }
                >
                    <GraphCanvas
                        chart_state=chart_state
                        set_chart_state=set_chart_state
                        now=now
                        strategy=strategy
                    />
                </Show>
            </div>
            <div class="sidebar">
                <div class="sidebar-header">
                    <h2>"Trains"</h2>
                </div>
                <TrainList chart_state=chart_state set_chart_state=set_chart_state />
                <TrainDetails
                    chart_state=chart_state
                    set_chart_state=set_chart_state
                    now=now
                    strategy=strategy
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn trains() -> Vec<Train> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid time");
        vec![Train {
            id: "Train A".to_string(),
            code: "A123".to_string(),
            journey_label: "London Waterloo to Weymouth".to_string(),
            points: vec![Point::new(start, 0.0)],
        }]
    }

    #[test]
    fn test_loaded_trains_reach_mounted_chart() {
        let runtime = create_runtime();
        let (chart_state, set_chart_state) = create_signal(ChartState::default());
        let (is_loading, set_is_loading) = create_signal(true);
        let alive = Cell::new(true);

        assert!(apply_loaded_trains(&alive, trains(), set_chart_state, set_is_loading));
        assert_eq!(chart_state.with_untracked(|s| s.all().len()), 1);
        assert!(!is_loading.get_untracked());
        runtime.dispose();
    }

    #[test]
    fn test_trains_arriving_after_cleanup_are_dropped() {
        let runtime = create_runtime();
        let (chart_state, set_chart_state) = create_signal(ChartState::default());
        let (is_loading, set_is_loading) = create_signal(true);

        // An effect owner stands in for the component; re-running it cleans up the previous run
        let (remount, set_remount) = create_signal(0);
        let liveness = Rc::new(RefCell::new(Vec::new()));
        create_effect({
            let liveness = Rc::clone(&liveness);
            move |_| {
                let _ = remount.get();
                liveness.borrow_mut().push(use_liveness());
            }
        });
        let first = Rc::clone(&liveness.borrow()[0]);
        assert!(first.get());

        set_remount.set(1);
        assert!(!first.get());

        assert!(!apply_loaded_trains(&first, trains(), set_chart_state, set_is_loading));
        assert!(chart_state.with_untracked(|s| s.all().is_empty()));
        assert!(is_loading.get_untracked());
        runtime.dispose();
    }
}
