//! Chart projection: layout, scales, zoom transform and the scene handed to
//! the SVG drawing layer

pub mod layout;
pub mod scale;
pub mod scene;
pub mod zoom;

pub use layout::ChartLayout;
pub use scale::{LinearScale, TimeScale};
pub use scene::{build_scene, AxisTick, ChartScene, NowLine, SceneInput, StationMarker, TrainLine};
pub use zoom::ZoomTransform;
