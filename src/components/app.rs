use leptos::*;
use leptos_meta::*;
use leptos_router::{use_query_map, Route, Router, Routes};
use crate::components::time_graph::TimeGraph;
use crate::loader::DataSource;

/// Reads `?source=` once per mount; changing it remounts the chart
#[component]
fn TrainGraphPage() -> impl IntoView {
    let query = use_query_map();

    move || {
        let source = query.with(|params| DataSource::from_query(params.get("source").map(String::as_str)));
        view! { <TimeGraph source=source /> }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Train Journey Graph"/>

        <Router>
            <div class="app">
                <Routes>
                    <Route path="/*any" view=TrainGraphPage />
                </Routes>
            </div>
        </Router>
    }
}
