#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod canvas_viewport;
pub mod graph_canvas;
pub mod station_label_tooltip;
pub mod time_graph;
pub mod train_details;
pub mod train_list;
