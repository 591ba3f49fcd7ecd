//! Real-time air temperature readings from data.gov.sg.

use serde::Deserialize;
use thiserror::Error;

const API_URL: &str = "https://api-open.data.gov.sg/v2/real-time/api/air-temperature";
const USER_AGENT: &str = "monsoon-weather/0.1";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("no temperature readings in response")]
    NoReadings,
}

// Shapes follow the v2 real-time API response.

#[derive(Debug, Deserialize)]
struct ApiPayload {
    data: ReadingSet,
}

#[derive(Debug, Deserialize)]
struct ReadingSet {
    readings: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct Reading {
    #[allow(dead_code)]
    #[serde(default)]
    timestamp: Option<String>,
    data: Vec<StationReading>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationReading {
    #[allow(dead_code)]
    #[serde(default)]
    station_id: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

/// Client for the Singapore air-temperature endpoint.
#[derive(Clone)]
pub struct TemperatureClient {
    client: reqwest::Client,
    url: String,
}

impl Default for TemperatureClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: API_URL.to_string(),
        }
    }

    /// Fetch the latest reading and format it as one line of text.
    pub async fn current_report(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/geo+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let payload: ApiPayload = response.json().await?;
        format_report(&payload).ok_or(FetchError::NoReadings)
    }
}

fn format_report(payload: &ApiPayload) -> Option<String> {
    // The first station of the first reading, matching the upstream API's
    // newest-first ordering.
    let value = payload
        .data
        .readings
        .first()?
        .data
        .first()?
        .value?;
    Some(format!("Temperature in Singapore is {value}°C"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ApiPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn formats_first_station_of_first_reading() {
        let payload = parse(
            r#"{"data":{"readings":[
                {"timestamp":"2026-08-23T12:00:00+08:00","data":[
                    {"stationId":"S109","value":31},
                    {"stationId":"S117","value":29.8}
                ]},
                {"timestamp":"2026-08-23T11:59:00+08:00","data":[
                    {"stationId":"S109","value":30}
                ]}
            ]}}"#,
        );
        assert_eq!(
            format_report(&payload).unwrap(),
            "Temperature in Singapore is 31°C"
        );
    }

    #[test]
    fn fractional_values_keep_their_precision() {
        let payload = parse(
            r#"{"data":{"readings":[{"data":[{"stationId":"S1","value":30.5}]}]}}"#,
        );
        assert_eq!(
            format_report(&payload).unwrap(),
            "Temperature in Singapore is 30.5°C"
        );
    }

    #[test]
    fn empty_readings_yield_nothing() {
        let payload = parse(r#"{"data":{"readings":[]}}"#);
        assert!(format_report(&payload).is_none());
    }

    #[test]
    fn missing_value_yields_nothing() {
        let payload = parse(r#"{"data":{"readings":[{"data":[{"stationId":"S1"}]}]}}"#);
        assert!(format_report(&payload).is_none());
    }
}
