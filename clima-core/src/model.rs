use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fixed qualifier appended to free-text geocoder queries.
pub const COUNTRY_QUALIFIER: &str = "Brasil";

const COORDINATE_HINT: &str = "invalid coordinates (e.g. latitude -23.55, longitude -46.63)";

/// Partial street address as returned by the postal-code directory.
///
/// Sub-fields the directory omits stay empty, they are never rendered as a
/// null placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
}

impl Address {
    /// Free-text geocoder query: the non-empty parts plus the country
    /// qualifier, joined by ", ".
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = [self.street.as_str(), self.neighborhood.as_str(), self.city.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        parts.push(COUNTRY_QUALIFIER);
        parts.join(", ")
    }
}

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Range-checked constructor: latitude in [-90, 90], longitude in
    /// [-180, 180], both finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(Error::Validation(COORDINATE_HINT.to_string()));
        }
        Ok(Self { latitude, longitude })
    }

    /// Parse a pair of text inputs, accepting comma or dot as the decimal
    /// separator. Rejection happens before any network call.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, Error> {
        match (parse_axis(latitude), parse_axis(longitude)) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => Err(Error::Validation(COORDINATE_HINT.to_string())),
        }
    }
}

fn parse_axis(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Hourly time/temperature series.
///
/// The two sequences always have equal length (`times[i]` corresponds to
/// `temperatures[i]`) and are only ever replaced together, wholesale; there
/// is no merging or appending across fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    times: Vec<String>,
    temperatures: Vec<f64>,
}

impl ForecastSeries {
    pub fn new(times: Vec<String>, temperatures: Vec<f64>) -> Result<Self, Error> {
        if times.len() != temperatures.len() {
            return Err(Error::MalformedResponse(format!(
                "hourly arrays disagree: {} times vs {} temperatures",
                times.len(),
                temperatures.len()
            )));
        }
        Ok(Self { times, temperatures })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&str, f64)> {
        Some((self.times.get(index)?.as_str(), *self.temperatures.get(index)?))
    }
}
