use crate::constants::API_BASE_URL;
use crate::error::ScheduleError;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Response of `GET /api/trains`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainList {
    #[serde(default)]
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    #[serde(default)]
    pub service_uid: Option<String>,
    #[serde(default)]
    pub train_identity: Option<String>,
    #[serde(default)]
    pub location_detail: Option<LocationDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationDetail {
    #[serde(default)]
    pub origin: Vec<Endpoint>,
    #[serde(default)]
    pub destination: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public_time: Option<String>,
}

/// Response of `GET /api/service/{uid}/{yyyy}/{mm}/{dd}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    #[serde(default)]
    pub train_identity: Option<String>,
    #[serde(default)]
    pub service_uid: Option<String>,
    #[serde(default)]
    pub locations: Option<Vec<CallingPoint>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    #[serde(default)]
    pub tiploc: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gbtt_booked_arrival: Option<String>,
    #[serde(default)]
    pub gbtt_booked_departure: Option<String>,
    #[serde(default)]
    pub realtime_arrival: Option<String>,
    #[serde(default)]
    pub realtime_departure: Option<String>,
}

#[must_use]
pub fn train_list_url() -> String {
    format!("{API_BASE_URL}/api/trains")
}

#[must_use]
pub fn service_detail_url(service_uid: &str, date: NaiveDate) -> String {
    format!(
        "{API_BASE_URL}/api/service/{service_uid}/{}/{:02}/{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ScheduleError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| ScheduleError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScheduleError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ScheduleError::Decode(e.to_string()))
}

/// Fetch the list of services running today
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not 2xx
/// - The response body cannot be deserialized
pub async fn fetch_train_list() -> Result<TrainList, ScheduleError> {
    get_json(&train_list_url()).await
}

/// Fetch the calling points of one service on `date`
///
/// # Errors
///
/// Same conditions as [`fetch_train_list`].
pub async fn fetch_service_detail(service_uid: &str, date: NaiveDate) -> Result<ServiceDetail, ScheduleError> {
    get_json(&service_detail_url(service_uid, date)).await
}
