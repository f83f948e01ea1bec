//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Clients for the postal-code directory, the coordinate sources and the
//!   forecast service
//! - The CEP→address→coordinate resolution pipeline and the forecast pager
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or
//! services.

pub mod cep;
pub mod config;
pub mod directory;
pub mod error;
pub mod forecast;
pub mod lookup;
pub mod model;
pub mod net;
pub mod page;
pub mod source;

pub use cep::Cep;
pub use config::{Config, Endpoints};
pub use error::Error;
pub use forecast::ForecastClient;
pub use lookup::{AddressPipeline, Resolution};
pub use model::{Address, Coordinate, ForecastSeries};
pub use page::{PageView, Pager};
pub use source::{CoordinateSource, Enrichment};
