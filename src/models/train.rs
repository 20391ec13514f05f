use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Arrival,
    Departure,
}

impl PointKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::Arrival => "arrival",
            PointKind::Departure => "departure",
        }
    }
}

/// A single plotted position of a train
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub time: NaiveDateTime,
    /// Kilometres along the route, within `[0, ROUTE_LENGTH_KM]`
    pub distance: f64,
    pub label: Option<String>,
    pub kind: Option<PointKind>,
}

impl Point {
    #[must_use]
    pub fn new(time: NaiveDateTime, distance: f64) -> Self {
        Self { time, distance, label: None, kind: None }
    }

    #[must_use]
    pub fn event(time: NaiveDateTime, distance: f64, label: &str, kind: PointKind) -> Self {
        Self {
            time,
            distance,
            label: Some(label.to_string()),
            kind: Some(kind),
        }
    }

    /// Tooltip text for a station marker
    #[must_use]
    pub fn marker_title(&self) -> Option<String> {
        let label = self.label.as_deref()?;
        Some(match self.kind {
            Some(kind) => format!("{label} ({})", kind.as_str()),
            None => label.to_string(),
        })
    }
}

/// A normalized train journey, ready to plot
///
/// Trains are identified by their display name (`id`) for filtering and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    pub id: String,
    pub code: String,
    pub journey_label: String,
    pub points: Vec<Point>,
}

impl Train {
    /// Points at or before `cutoff`, or all points when there is no cutoff
    pub fn points_until(&self, cutoff: Option<NaiveDateTime>) -> impl Iterator<Item = &Point> {
        self.points
            .iter()
            .filter(move |p| cutoff.map_or(true, |c| p.time <= c))
    }

    /// Distance of the latest point at or before `cutoff`
    ///
    /// Without a cutoff this is the distance of the last point.
    #[must_use]
    pub fn current_distance(&self, cutoff: Option<NaiveDateTime>) -> Option<f64> {
        self.points_until(cutoff).last().map(|p| p.distance)
    }
}
