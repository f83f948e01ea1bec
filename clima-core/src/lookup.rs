use crate::{
    cep::Cep,
    config::Config,
    directory::DirectoryClient,
    error::Error,
    model::Address,
    source::{self, CoordinateSource, Enrichment},
};

/// Everything a successful postal-code submission produces.
#[derive(Debug)]
pub struct Resolution {
    pub cep: Cep,
    pub address: Address,
    pub enrichment: Enrichment,
}

impl Resolution {
    /// The assembled status line: the base message plus exactly one
    /// enrichment suffix.
    pub fn status(&self) -> String {
        format!("address found · {}", self.enrichment.status_suffix())
    }
}

/// The postal-code submission pipeline: validate, query the directory, then
/// run the coordinate fallback chain.
///
/// Enrichment never demotes a resolved address; its outcome only shows up in
/// the status line.
#[derive(Debug)]
pub struct AddressPipeline {
    directory: DirectoryClient,
    sources: Vec<Box<dyn CoordinateSource>>,
}

impl AddressPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            directory: DirectoryClient::new(config),
            sources: source::default_sources(config),
        }
    }

    pub async fn run(&self, raw_cep: &str) -> Result<Resolution, Error> {
        let cep = Cep::parse(raw_cep)?;

        let address = self.directory.lookup(&cep).await?;
        tracing::info!(%cep, "address found");

        let enrichment = source::resolve_coordinates(&self.sources, &cep, &address).await;

        Ok(Resolution { cep, address, enrichment })
    }
}
