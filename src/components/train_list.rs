use crate::constants::FILTER_COUNTS;
use crate::selection::ChartState;
use leptos::{component, view, CollectView, IntoView, ReadSignal, SignalUpdate, SignalWith, WriteSignal};

#[component]
#[must_use]
pub fn TrainList(
    chart_state: ReadSignal<ChartState>,
    set_chart_state: WriteSignal<ChartState>,
) -> impl IntoView {
    let filter_buttons = FILTER_COUNTS
        .iter()
        .map(|&count| {
            let is_active = move || chart_state.with(|state| state.filter_count() == Some(count));
            view! {
                <button
                    class="filter-button"
                    class:active=is_active
                    on:click=move |_| set_chart_state.update(|state| state.set_filter_count(count))
                >
                    {format!("Show Top {count} Trains")}
                </button>
            }
        })
        .collect_view();

    let entries = move || {
        chart_state.with(|state| {
            state
                .visible()
                .iter()
                .enumerate()
                .map(|(index, train)| {
                    let name = train.id.clone();
                    let is_selected = state.selected_name() == Some(train.id.as_str());
                    view! {
                        <li
                            class="train-list-item"
                            class:selected=is_selected
                            style=format!("color: {};", ChartState::color_of(index))
                            on:click=move |_| set_chart_state.update(|state| state.select(Some(&name)))
                        >
                            {train.id.clone()}
                        </li>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="train-list">
            <div class="filter-buttons">{filter_buttons}</div>
            <ul class="train-list-items">{entries}</ul>
        </div>
    }
}
