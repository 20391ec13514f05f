use crate::api::{self, ServiceDetail, ServiceSummary};
use crate::error::ScheduleError;
use crate::logging::log;
use crate::models::{NormalizationStrategy, Train};
use crate::normalize::{normalize_service_detail, normalize_summary};
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::future::Future;

/// Where the chart gets its trains from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// One detail request per listed service, every calling point plotted
    #[default]
    Detailed,
    /// Train list only, origin and destination plotted
    Simple,
    /// The bundled static dataset, no network
    Fixture,
}

impl DataSource {
    /// Parse the `source` query parameter, falling back to the default for
    /// missing or unknown values
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("simple") => DataSource::Simple,
            Some("fixture") => DataSource::Fixture,
            _ => DataSource::Detailed,
        }
    }

    #[must_use]
    pub fn strategy(self) -> NormalizationStrategy {
        match self {
            DataSource::Detailed => NormalizationStrategy::Detailed,
            DataSource::Simple | DataSource::Fixture => NormalizationStrategy::Simple,
        }
    }
}

/// Normalize every summary, logging and skipping malformed ones
#[must_use]
pub fn summaries_to_trains(services: &[ServiceSummary], service_date: NaiveDate) -> Vec<Train> {
    services
        .iter()
        .filter_map(|service| match normalize_summary(service, service_date) {
            Ok(train) => Some(train),
            Err(e) => {
                leptos::logging::warn!("Skipping service: {}", e);
                None
            }
        })
        .collect()
}

/// Fetch and normalize the detail of every listed service concurrently
///
/// A service whose fetch or normalization fails is logged and left out; the
/// rest of the batch is still returned, in train list order.
pub async fn load_detailed_trains<F, Fut>(
    services: &[ServiceSummary],
    service_date: NaiveDate,
    fetch_detail: F,
) -> Vec<Train>
where
    F: Fn(String, NaiveDate) -> Fut,
    Fut: Future<Output = Result<ServiceDetail, ScheduleError>>,
{
    let requests = services.iter().filter_map(|service| {
        let Some(uid) = service.service_uid.clone().filter(|uid| !uid.is_empty()) else {
            leptos::logging::warn!("Skipping service without serviceUid");
            return None;
        };
        let fetch = fetch_detail(uid.clone(), service_date);
        Some(async move { (uid, fetch.await) })
    });

    join_all(requests)
        .await
        .into_iter()
        .filter_map(|(uid, result)| {
            match result.and_then(|detail| normalize_service_detail(&detail, service_date)) {
                Ok(train) => Some(train),
                Err(e) if e.is_network() => {
                    leptos::logging::error!("Error fetching detailed train data for {}: {}", uid, e);
                    None
                }
                Err(e) => {
                    leptos::logging::warn!("Skipping service {}: {}", uid, e);
                    None
                }
            }
        })
        .collect()
}

/// Load trains from `source` for `service_date`
///
/// A failed train list request is logged and yields no trains.
pub async fn load_trains(source: DataSource, service_date: NaiveDate) -> Vec<Train> {
    if source == DataSource::Fixture {
        return crate::data::fixture_trains(service_date);
    }

    let list = match api::fetch_train_list().await {
        Ok(list) => list,
        Err(e) => {
            leptos::logging::error!("Error fetching train data: {}", e);
            return Vec::new();
        }
    };
    log!("Fetched {} services", list.services.len());

    match source {
        DataSource::Simple => summaries_to_trains(&list.services, service_date),
        _ => {
            load_detailed_trains(&list.services, service_date, |uid, date| async move {
                api::fetch_service_detail(&uid, date).await
            })
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CallingPoint;
    use futures_lite::future::block_on;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date")
    }

    fn listed(uid: &str) -> ServiceSummary {
        ServiceSummary {
            service_uid: Some(uid.to_string()),
            train_identity: Some(format!("Train {uid}")),
            location_detail: None,
        }
    }

    fn stop(description: &str, departure: &str) -> CallingPoint {
        CallingPoint {
            tiploc: description.to_uppercase(),
            description: description.to_string(),
            gbtt_booked_departure: Some(departure.to_string()),
            ..CallingPoint::default()
        }
    }

    fn fake_detail(uid: &str) -> Result<ServiceDetail, ScheduleError> {
        match uid {
            "BAD" => Err(ScheduleError::Status { status: 500, url: format!("/api/service/{uid}") }),
            "BROKEN" => Ok(ServiceDetail {
                train_identity: Some("Broken".to_string()),
                service_uid: Some(uid.to_string()),
                locations: None,
            }),
            _ => Ok(ServiceDetail {
                train_identity: Some(format!("Train {uid}")),
                service_uid: Some(uid.to_string()),
                locations: Some(vec![stop("Origin", "0800"), stop("Terminus", "0900")]),
            }),
        }
    }

    #[test]
    fn test_failed_fetch_drops_only_that_train() {
        let services = vec![listed("A"), listed("BAD"), listed("C")];
        let trains = block_on(load_detailed_trains(&services, date(), |uid, _| async move {
            fake_detail(&uid)
        }));
        let ids: Vec<_> = trains.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["Train A", "Train C"]);
    }

    #[test]
    fn test_structural_error_drops_only_that_train() {
        let services = vec![listed("BROKEN"), listed("B")];
        let trains = block_on(load_detailed_trains(&services, date(), |uid, _| async move {
            fake_detail(&uid)
        }));
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].code, "B");
    }

    #[test]
    fn test_service_without_uid_is_not_requested() {
        let mut anonymous = listed("X");
        anonymous.service_uid = None;
        let services = vec![anonymous, listed("D")];
        let requested = std::cell::RefCell::new(Vec::new());
        let trains = block_on(load_detailed_trains(&services, date(), |uid, _| {
            requested.borrow_mut().push(uid.clone());
            async move { fake_detail(&uid) }
        }));
        assert_eq!(trains.len(), 1);
        assert_eq!(*requested.borrow(), vec!["D".to_string()]);
    }

    #[test]
    fn test_detail_requested_for_service_date() {
        let services = vec![listed("A")];
        let trains = block_on(load_detailed_trains(&services, date(), |uid, requested_date| async move {
            assert_eq!(requested_date, date());
            fake_detail(&uid)
        }));
        assert_eq!(trains.len(), 1);
    }

    #[test]
    fn test_summaries_to_trains_skips_malformed() {
        let trains = summaries_to_trains(&[listed("A")], date());
        assert!(trains.is_empty());
    }

    #[test]
    fn test_data_source_from_query() {
        assert_eq!(DataSource::from_query(None), DataSource::Detailed);
        assert_eq!(DataSource::from_query(Some("simple")), DataSource::Simple);
        assert_eq!(DataSource::from_query(Some("Fixture")), DataSource::Fixture);
        assert_eq!(DataSource::from_query(Some("nonsense")), DataSource::Detailed);
    }

    #[test]
    fn test_data_source_strategy() {
        assert!(DataSource::Detailed.strategy().is_live());
        assert!(!DataSource::Simple.strategy().is_live());
        assert!(!DataSource::Fixture.strategy().is_live());
    }
}
