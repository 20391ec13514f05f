/// Reference length of the route in kilometres (London Waterloo to Weymouth).
/// Every train shares the distance axis `[0, ROUTE_LENGTH_KM]`.
pub const ROUTE_LENGTH_KM: f64 = 191.0;

/// Base URL of the schedule API, overridable at compile time with
/// `TRAIN_API_BASE_URL`
pub const API_BASE_URL: &str = match option_env!("TRAIN_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:4000",
};

/// Width reserved for the train list on the right of the chart
pub const SIDE_PANEL_WIDTH: f64 = 200.0;

// Chart margins in pixels
pub const MARGIN_TOP: f64 = 20.0;
pub const MARGIN_RIGHT: f64 = 30.0;
pub const MARGIN_BOTTOM: f64 = 30.0;
pub const MARGIN_LEFT: f64 = 40.0;

/// Pixels per time axis tick
pub const X_TICK_SPACING: f64 = 80.0;
/// Pixels per distance axis tick
pub const Y_TICK_SPACING: f64 = 50.0;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;

/// Train counts offered by the filter buttons
pub const FILTER_COUNTS: [usize; 2] = [5, 10];

/// How often "now" is refreshed for the live trailing view
pub const CLOCK_REFRESH_MS: u32 = 30_000;

/// Categorical palette (d3 `schemeCategory10`)
pub const TRAIN_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];
