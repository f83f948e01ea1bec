use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    error::Error,
    model::{Coordinate, ForecastSeries},
    net,
};

/// All timestamps are requested in this zone; the pager renders them as-is.
pub const FORECAST_TIMEZONE: &str = "America/Sao_Paulo";

/// Client for the Open-Meteo hourly forecast service.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    base: String,
    http: Client,
    deadline: Duration,
}

impl ForecastClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.endpoints.open_meteo.clone(),
            http: Client::new(),
            deadline: config.deadline(),
        }
    }

    /// Fetch the hourly temperature series for a coordinate.
    ///
    /// The series replaces any previous one wholesale; on a body without the
    /// hourly block the server-supplied reason is surfaced when present.
    pub async fn hourly(&self, coordinate: Coordinate) -> Result<ForecastSeries, Error> {
        let latitude = coordinate.latitude.to_string();
        let longitude = coordinate.longitude.to_string();

        let body = net::with_deadline(self.deadline, async {
            let res = self
                .http
                .get(&self.base)
                .query(&[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("hourly", "temperature_2m"),
                    ("timezone", FORECAST_TIMEZONE),
                ])
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                return Err(Error::http_status("Open-Meteo", status.as_u16()));
            }

            Ok(res.text().await?)
        })
        .await?;

        let parsed: OpenMeteoBody = serde_json::from_str(&body)?;

        let hourly = parsed.hourly.unwrap_or_default();
        match (hourly.time, hourly.temperature_2m) {
            (Some(times), Some(temperatures)) => ForecastSeries::new(times, temperatures),
            _ => Err(Error::MalformedResponse(
                parsed.reason.unwrap_or_else(|| "response missing hourly block".to_string()),
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OmHourly {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoBody {
    hourly: Option<OmHourly>,
    reason: Option<String>,
}
