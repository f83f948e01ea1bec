use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    cep::Cep,
    config::Config,
    error::Error,
    model::{Address, Coordinate},
    net,
    source::CoordinateSource,
};

/// Structured coordinate lookup keyed by postal code.
#[derive(Debug, Clone)]
pub struct BrasilApiSource {
    base: String,
    http: Client,
    deadline: Duration,
}

impl BrasilApiSource {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.endpoints.brasilapi.clone(),
            http: Client::new(),
            deadline: config.deadline(),
        }
    }
}

#[async_trait]
impl CoordinateSource for BrasilApiSource {
    fn name(&self) -> &'static str {
        "BrasilAPI"
    }

    async fn resolve(&self, cep: &Cep, _address: &Address) -> Result<Coordinate, Error> {
        let url = format!("{}/{}", self.base, cep.digits());

        let body = net::with_deadline(self.deadline, async {
            let res = self.http.get(&url).send().await?;

            let status = res.status();
            if !status.is_success() {
                return Err(Error::http_status("BrasilAPI", status.as_u16()));
            }

            Ok(res.text().await?)
        })
        .await?;

        let parsed: BrasilApiBody = serde_json::from_str(&body)?;

        let coordinates = parsed
            .location
            .and_then(|location| location.coordinates)
            .ok_or_else(|| Error::MalformedResponse("response missing coordinates".to_string()))?;

        let latitude = coordinates.latitude.as_ref().and_then(NumberOrText::as_f64);
        let longitude = coordinates.longitude.as_ref().and_then(NumberOrText::as_f64);

        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => Err(Error::MalformedResponse("response missing coordinates".to_string())),
        }
    }
}

// The service has emitted coordinates both as JSON numbers and as
// string-encoded numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(t) => t.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BaCoordinates {
    latitude: Option<NumberOrText>,
    longitude: Option<NumberOrText>,
}

#[derive(Debug, Deserialize)]
struct BaLocation {
    coordinates: Option<BaCoordinates>,
}

#[derive(Debug, Deserialize)]
struct BrasilApiBody {
    location: Option<BaLocation>,
}
