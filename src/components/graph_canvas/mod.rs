pub mod axes;
pub mod now_line;
pub mod train_journeys;
mod canvas;

pub use canvas::*;
pub use train_journeys::HoveredMarker;
