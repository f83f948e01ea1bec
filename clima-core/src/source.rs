use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    cep::Cep,
    config::Config,
    error::Error,
    model::{Address, Coordinate},
    source::{brasilapi::BrasilApiSource, nominatim::NominatimSource},
};

pub mod brasilapi;
pub mod nominatim;

/// One way of turning a resolved address into coordinates.
///
/// Sources are tried in priority order; a failing source is logged and
/// skipped, it never fails the surrounding pipeline.
#[async_trait]
pub trait CoordinateSource: Send + Sync + Debug {
    /// Short name used in status lines and logs.
    fn name(&self) -> &'static str;

    async fn resolve(&self, cep: &Cep, address: &Address) -> Result<Coordinate, Error>;
}

/// Outcome of the fallback chain. Exactly one of the two shapes per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enrichment {
    Found {
        coordinate: Coordinate,
        source: &'static str,
    },
    NotFound,
}

impl Enrichment {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Enrichment::Found { coordinate, .. } => Some(*coordinate),
            Enrichment::NotFound => None,
        }
    }

    /// The suffix appended to the pipeline status line.
    pub fn status_suffix(&self) -> String {
        match self {
            Enrichment::Found { source, .. } => format!("coordinates via {source}"),
            Enrichment::NotFound => "no coordinates found".to_string(),
        }
    }
}

/// Fold the sources with first-success-wins.
///
/// Each source runs inside its own failure boundary: errors advance the
/// chain and are never surfaced. Infallible by construction.
pub async fn resolve_coordinates(
    sources: &[Box<dyn CoordinateSource>],
    cep: &Cep,
    address: &Address,
) -> Enrichment {
    for source in sources {
        match source.resolve(cep, address).await {
            Ok(coordinate) => {
                tracing::debug!(source = source.name(), ?coordinate, "coordinate source answered");
                return Enrichment::Found { coordinate, source: source.name() };
            }
            Err(err) => {
                tracing::debug!(source = source.name(), %err, "coordinate source failed, trying next");
            }
        }
    }

    Enrichment::NotFound
}

/// The production chain: BrasilAPI first, Nominatim as fallback.
pub fn default_sources(config: &Config) -> Vec<Box<dyn CoordinateSource>> {
    vec![
        Box::new(BrasilApiSource::new(config)),
        Box::new(NominatimSource::new(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(&'static str, f64, f64);

    #[async_trait]
    impl CoordinateSource for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn resolve(&self, _cep: &Cep, _address: &Address) -> Result<Coordinate, Error> {
            Coordinate::new(self.1, self.2)
        }
    }

    #[derive(Debug)]
    struct Failing(&'static str);

    #[async_trait]
    impl CoordinateSource for Failing {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn resolve(&self, _cep: &Cep, _address: &Address) -> Result<Coordinate, Error> {
            Err(Error::http_status(self.0, 500))
        }
    }

    fn inputs() -> (Cep, Address) {
        (Cep::parse("01310100").unwrap(), Address::default())
    }

    #[tokio::test]
    async fn first_success_wins() {
        let sources: Vec<Box<dyn CoordinateSource>> = vec![
            Box::new(Fixed("first", -23.55, -46.63)),
            Box::new(Fixed("second", 0.0, 0.0)),
        ];
        let (cep, address) = inputs();

        let outcome = resolve_coordinates(&sources, &cep, &address).await;

        assert_eq!(
            outcome,
            Enrichment::Found {
                coordinate: Coordinate::new(-23.55, -46.63).unwrap(),
                source: "first",
            }
        );
    }

    #[tokio::test]
    async fn failures_fall_through_in_order() {
        let sources: Vec<Box<dyn CoordinateSource>> = vec![
            Box::new(Failing("first")),
            Box::new(Fixed("second", -23.5, -46.6)),
        ];
        let (cep, address) = inputs();

        let outcome = resolve_coordinates(&sources, &cep, &address).await;

        assert_eq!(outcome.status_suffix(), "coordinates via second");
    }

    #[tokio::test]
    async fn exhausted_chain_reports_not_found() {
        let sources: Vec<Box<dyn CoordinateSource>> =
            vec![Box::new(Failing("first")), Box::new(Failing("second"))];
        let (cep, address) = inputs();

        let outcome = resolve_coordinates(&sources, &cep, &address).await;

        assert_eq!(outcome, Enrichment::NotFound);
        assert_eq!(outcome.status_suffix(), "no coordinates found");
        assert_eq!(outcome.coordinate(), None);
    }

    #[tokio::test]
    async fn empty_chain_reports_not_found() {
        let (cep, address) = inputs();
        let outcome = resolve_coordinates(&[], &cep, &address).await;
        assert_eq!(outcome, Enrichment::NotFound);
    }
}
