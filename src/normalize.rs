use crate::api::{CallingPoint, ServiceDetail, ServiceSummary};
use crate::constants::ROUTE_LENGTH_KM;
use crate::error::ScheduleError;
use crate::models::{Point, PointKind, Train};
use crate::time::{parse_hhmm_on, roll_past_midnight};
use chrono::{NaiveDate, NaiveDateTime};

fn required<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str, ScheduleError> {
    value
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ScheduleError::Structural { field })
}

/// First value that is present and non-empty; realtime wins over booked
fn first_non_empty<'a>(realtime: Option<&'a String>, booked: Option<&'a String>) -> Option<&'a str> {
    realtime
        .filter(|s| !s.is_empty())
        .or(booked.filter(|s| !s.is_empty()))
        .map(String::as_str)
}

/// Distance of calling point `index` out of `stop_count`
///
/// Stops are spaced uniformly along the route rather than by track mileage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn station_distance(index: usize, stop_count: usize) -> f64 {
    if stop_count <= 1 {
        return 0.0;
    }
    (index as f64 / (stop_count - 1) as f64) * ROUTE_LENGTH_KM
}

/// Accumulates points in order, rolling times past midnight when needed
struct PointSequence {
    points: Vec<Point>,
    last_time: Option<NaiveDateTime>,
}

impl PointSequence {
    fn new() -> Self {
        Self { points: Vec::new(), last_time: None }
    }

    fn push(&mut self, time: NaiveDateTime, distance: f64, label: &str, kind: PointKind) {
        let time = roll_past_midnight(time, self.last_time);
        self.last_time = Some(time);
        self.points.push(Point::event(time, distance, label, kind));
    }
}

fn push_calling_point(
    sequence: &mut PointSequence,
    station: &CallingPoint,
    distance: f64,
    service_date: NaiveDate,
) {
    let arrival = first_non_empty(station.realtime_arrival.as_ref(), station.gbtt_booked_arrival.as_ref())
        .and_then(|s| parse_hhmm_on(s, service_date));
    let departure = first_non_empty(station.realtime_departure.as_ref(), station.gbtt_booked_departure.as_ref())
        .and_then(|s| parse_hhmm_on(s, service_date));

    if let Some(time) = arrival {
        sequence.push(time, distance, &station.description, PointKind::Arrival);
    }
    if let Some(time) = departure {
        sequence.push(time, distance, &station.description, PointKind::Departure);
    }
}

/// Build a train from one service's calling points
///
/// Each calling point contributes an arrival and/or a departure point when the
/// corresponding time parses.
///
/// # Errors
///
/// Returns `ScheduleError::Structural` if the train identity, service UID or
/// calling points are missing or empty.
pub fn normalize_service_detail(detail: &ServiceDetail, service_date: NaiveDate) -> Result<Train, ScheduleError> {
    let locations = detail
        .locations
        .as_ref()
        .ok_or(ScheduleError::Structural { field: "locations" })?;
    let id = required(detail.train_identity.as_ref(), "trainIdentity")?;
    let code = required(detail.service_uid.as_ref(), "serviceUid")?;

    let (Some(first), Some(last)) = (locations.first(), locations.last()) else {
        return Err(ScheduleError::Structural { field: "locations" });
    };

    let mut sequence = PointSequence::new();
    for (index, station) in locations.iter().enumerate() {
        let distance = station_distance(index, locations.len());
        push_calling_point(&mut sequence, station, distance, service_date);
    }

    Ok(Train {
        id: id.to_string(),
        code: code.to_string(),
        journey_label: format!("{} to {}", first.description, last.description),
        points: sequence.points,
    })
}

/// Build a two-point train from a train list entry: departure at the start of
/// the route, arrival at its end
///
/// # Errors
///
/// Returns `ScheduleError::Structural` if the identity, UID, location detail,
/// origin or destination is missing.
pub fn normalize_summary(summary: &ServiceSummary, service_date: NaiveDate) -> Result<Train, ScheduleError> {
    let id = required(summary.train_identity.as_ref(), "trainIdentity")?;
    let code = required(summary.service_uid.as_ref(), "serviceUid")?;
    let detail = summary
        .location_detail
        .as_ref()
        .ok_or(ScheduleError::Structural { field: "locationDetail" })?;
    let origin = detail
        .origin
        .first()
        .ok_or(ScheduleError::Structural { field: "locationDetail.origin" })?;
    let destination = detail
        .destination
        .first()
        .ok_or(ScheduleError::Structural { field: "locationDetail.destination" })?;

    let mut sequence = PointSequence::new();
    if let Some(time) = origin.public_time.as_deref().and_then(|s| parse_hhmm_on(s, service_date)) {
        sequence.push(time, 0.0, &origin.description, PointKind::Departure);
    }
    if let Some(time) = destination.public_time.as_deref().and_then(|s| parse_hhmm_on(s, service_date)) {
        sequence.push(time, ROUTE_LENGTH_KM, &destination.description, PointKind::Arrival);
    }

    Ok(Train {
        id: id.to_string(),
        code: code.to_string(),
        journey_label: format!("{} to {}", origin.description, destination.description),
        points: sequence.points,
    })
}
