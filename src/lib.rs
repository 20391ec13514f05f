pub mod api;
pub mod chart;
pub mod clock;
pub mod components;
pub mod constants;
pub mod data;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod selection;
pub mod time;

pub use components::app::App;
