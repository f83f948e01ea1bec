use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;

use crate::{
    cep::Cep,
    config::Config,
    error::Error,
    model::{Address, Coordinate},
    net,
    source::CoordinateSource,
};

// Nominatim's usage policy requires an identifying agent.
const USER_AGENT: &str = "clima/0.1.0 (https://github.com/clima-cli/clima)";

/// Free-text geocoding over the assembled address, restricted to Brazil.
#[derive(Debug, Clone)]
pub struct NominatimSource {
    base: String,
    http: Client,
    deadline: Duration,
}

impl NominatimSource {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.endpoints.nominatim.clone(),
            http: Client::new(),
            deadline: config.deadline(),
        }
    }
}

#[async_trait]
impl CoordinateSource for NominatimSource {
    fn name(&self) -> &'static str {
        "Nominatim"
    }

    async fn resolve(&self, _cep: &Cep, address: &Address) -> Result<Coordinate, Error> {
        let query = address.search_text();

        let body = net::with_deadline(self.deadline, async {
            let res = self
                .http
                .get(&self.base)
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, "application/json")
                .query(&[
                    ("q", query.as_str()),
                    ("format", "json"),
                    ("limit", "1"),
                    ("addressdetails", "1"),
                    ("countrycodes", "br"),
                ])
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                return Err(Error::http_status("Nominatim", status.as_u16()));
            }

            Ok(res.text().await?)
        })
        .await?;

        let hits: Vec<NominatimHit> = serde_json::from_str(&body)?;

        let hit = hits
            .first()
            .ok_or_else(|| Error::MalformedResponse("geocoder returned no results".to_string()))?;

        match (parse_axis(&hit.lat), parse_axis(&hit.lon)) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => Err(Error::MalformedResponse("geocoder returned unparseable coordinates".to_string())),
        }
    }
}

fn parse_axis(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}
