mod train;

pub use train::{Point, PointKind, Train};

/// Which normalizer produced the trains, and therefore how they are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationStrategy {
    /// Origin and destination only, from the train list
    Simple,
    /// Every calling point, from one detail request per service
    #[default]
    Detailed,
}

impl NormalizationStrategy {
    /// The detailed view trails "now": only past points are drawn and a
    /// marker shows the current time
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, NormalizationStrategy::Detailed)
    }
}
