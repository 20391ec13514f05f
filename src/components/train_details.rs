use crate::models::{NormalizationStrategy, Train};
use crate::selection::ChartState;
use chrono::NaiveDateTime;
use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalUpdate, SignalWith, WriteSignal};

/// Distance shown in the detail panel, rounded to one decimal
fn distance_text(train: &Train, strategy: NormalizationStrategy, now: NaiveDateTime) -> String {
    let cutoff = strategy.is_live().then_some(now);
    train
        .current_distance(cutoff)
        .map_or_else(|| "unknown".to_string(), |km| format!("{km:.1} km"))
}

#[component]
#[must_use]
pub fn TrainDetails(
    chart_state: ReadSignal<ChartState>,
    set_chart_state: WriteSignal<ChartState>,
    now: ReadSignal<NaiveDateTime>,
    strategy: NormalizationStrategy,
) -> impl IntoView {
    move || {
        let current_time = now.get();
        chart_state.with(|state| {
            state.selected_train().map(|train| {
                view! {
                    <div class="train-details">
                        <h3>{train.id.clone()}</h3>
                        <p>"Train code: " {train.code.clone()}</p>
                        <p>"Journey details: " {train.journey_label.clone()}</p>
                        <p>"Current distance: " {distance_text(train, strategy, current_time)}</p>
                        <button
                            class="close-button"
                            on:click=move |_| set_chart_state.update(|state| state.select(None))
                        >
                            "Close"
                        </button>
                    </div>
                }
            })
        })
    }
}
