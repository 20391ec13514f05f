use crate::constants::ROUTE_LENGTH_KM;
use crate::models::{Point, Train};
use crate::time::roll_past_midnight;
use chrono::{NaiveDate, NaiveTime};

/// Parse the bundled static dataset onto `service_date`
#[must_use]
pub fn fixture_trains(service_date: NaiveDate) -> Vec<Train> {
    parse_fixture_csv(include_str!("../fixtures/trains.csv"), service_date)
}

/// Parse fixture CSV with the columns `train,code,journey,time,distance`
///
/// Rows are grouped by train name in order of first appearance. Rows with a
/// bad time or distance are skipped; distances are clamped to the route.
#[must_use]
pub fn parse_fixture_csv(csv_content: &str, service_date: NaiveDate) -> Vec<Train> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut trains: Vec<Train> = Vec::new();

    for record in reader.records() {
        let Ok(row) = record else { continue };
        let (Some(name), Some(code), Some(journey), Some(time), Some(distance)) =
            (row.get(0), row.get(1), row.get(2), row.get(3), row.get(4))
        else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M") else { continue };
        let Ok(distance) = distance.parse::<f64>() else { continue };
        if !distance.is_finite() {
            continue;
        }

        let index = match trains.iter().position(|t| t.id == name) {
            Some(index) => index,
            None => {
                trains.push(Train {
                    id: name.to_string(),
                    code: code.to_string(),
                    journey_label: journey.to_string(),
                    points: Vec::new(),
                });
                trains.len() - 1
            }
        };

        let train = &mut trains[index];
        let previous = train.points.last().map(|p| p.time);
        let time = roll_past_midnight(service_date.and_time(time), previous);
        train.points.push(Point::new(time, distance.clamp(0.0, ROUTE_LENGTH_KM)));
    }

    trains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date")
    }

    #[test]
    fn test_bundled_fixture_parses() {
        let trains = fixture_trains(date());
        assert_eq!(trains.len(), 8);
        assert!(trains.iter().all(|t| !t.points.is_empty()));
        assert!(trains
            .iter()
            .flat_map(|t| &t.points)
            .all(|p| (0.0..=ROUTE_LENGTH_KM).contains(&p.distance)));
    }

    #[test]
    fn test_bundled_fixture_overshoot_is_clamped() {
        let trains = fixture_trains(date());
        let train_e = trains.iter().find(|t| t.id == "Train E").expect("Train E in fixture");
        let distances: Vec<_> = train_e.points.iter().map(|p| p.distance).collect();
        assert_eq!(distances, vec![0.0, 70.0, 140.0, ROUTE_LENGTH_KM, ROUTE_LENGTH_KM]);

        let train_a = trains.iter().find(|t| t.id == "Train A").expect("Train A in fixture");
        assert_eq!(train_a.current_distance(None), Some(ROUTE_LENGTH_KM));
    }

    #[test]
    fn test_groups_rows_in_first_appearance_order() {
        let csv = "train,code,journey,time,distance\n\
                   Train C,C1,X to Y,09:00,0\n\
                   Train A,A1,X to Y,08:00,0\n\
                   Train C,C1,X to Y,10:00,60\n";
        let trains = parse_fixture_csv(csv, date());
        let ids: Vec<_> = trains.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["Train C", "Train A"]);
        assert_eq!(trains[0].points.len(), 2);
        assert_eq!(trains[0].code, "C1");
        assert_eq!(trains[0].journey_label, "X to Y");
    }

    #[test]
    fn test_skips_bad_rows_and_clamps_distance() {
        let csv = "train,code,journey,time,distance\n\
                   Train E,E1,G to H,09:15,0\n\
                   Train E,E1,G to H,25:00,10\n\
                   Train E,E1,G to H,10:15,far\n\
                   Train E,E1,G to H,12:15,210\n";
        let trains = parse_fixture_csv(csv, date());
        assert_eq!(trains.len(), 1);
        let distances: Vec<_> = trains[0].points.iter().map(|p| p.distance).collect();
        assert_eq!(distances, vec![0.0, ROUTE_LENGTH_KM]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_fixture_csv("train,code,journey,time,distance\n", date()).is_empty());
    }
}
