use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select};

use clima_core::{
    config::Config,
    forecast::ForecastClient,
    lookup::AddressPipeline,
    model::Coordinate,
    page::Pager,
};

use crate::progress::Busy;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "CEP and hourly forecast lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a postal code to an address and coordinates.
    Cep {
        /// Postal code, with or without the hyphen (e.g. 01310-100).
        code: String,
    },

    /// Fetch the hourly temperature forecast and page through it.
    Forecast {
        /// Latitude, dot or comma decimal separator.
        #[arg(allow_hyphen_values = true)]
        latitude: String,

        /// Longitude, dot or comma decimal separator.
        #[arg(allow_hyphen_values = true)]
        longitude: String,

        /// Hours per page; defaults to the configured value.
        #[arg(long)]
        hours_per_page: Option<usize>,
    },

    /// Show or update stored settings.
    Config {
        /// New default page size in hours.
        #[arg(long)]
        hours_per_page: Option<usize>,

        /// New request deadline in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Cep { code } => run_cep(&code).await,
            Command::Forecast { latitude, longitude, hours_per_page } => {
                run_forecast(&latitude, &longitude, hours_per_page).await
            }
            Command::Config { hours_per_page, timeout_ms } => run_config(hours_per_page, timeout_ms),
        }
    }
}

async fn run_cep(code: &str) -> Result<()> {
    let config = Config::load()?;
    let pipeline = AddressPipeline::new(&config);

    let busy = Busy::start("looking up address");
    let result = pipeline.run(code).await;
    drop(busy);

    let resolution = result?;

    println!("cep:          {}", resolution.cep);
    println!("street:       {}", resolution.address.street);
    println!("neighborhood: {}", resolution.address.neighborhood);
    println!("city:         {}", resolution.address.city);
    if let Some(coordinate) = resolution.enrichment.coordinate() {
        println!("latitude:     {}", coordinate.latitude);
        println!("longitude:    {}", coordinate.longitude);
    }
    println!("{}", resolution.status());

    Ok(())
}

async fn run_forecast(latitude: &str, longitude: &str, hours_per_page: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let coordinate = Coordinate::parse(latitude, longitude)?;
    let client = ForecastClient::new(&config);

    let busy = Busy::start("fetching forecast");
    let result = client.hourly(coordinate).await;
    drop(busy);

    let series = result?;
    let mut pager = Pager::with_series(series, hours_per_page.unwrap_or(config.hours_per_page));

    println!("use the controls to navigate");
    render(&pager);
    navigate(&mut pager)
}

fn render(pager: &Pager) {
    let view = pager.view();
    for row in &view.rows {
        println!("{}  {}", row.when, row.temperature);
    }
    if !view.status.is_empty() {
        println!("{}", view.status);
    }
}

const NEXT: &str = "next page";
const PREV: &str = "previous page";
const RESIZE: &str = "change page size";
const QUIT: &str = "quit";

fn navigate(pager: &mut Pager) -> Result<()> {
    loop {
        let view = pager.view();

        // Unavailable directions are simply not offered.
        let mut options = Vec::new();
        if view.has_next {
            options.push(NEXT);
        }
        if view.has_prev {
            options.push(PREV);
        }
        options.push(RESIZE);
        options.push(QUIT);

        let choice = match Select::new("navigate:", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        match choice {
            NEXT => {
                pager.next();
            }
            PREV => {
                pager.prev();
            }
            RESIZE => {
                match CustomType::<usize>::new("hours per page:")
                    .with_help_message("rows per page, at least 1")
                    .prompt()
                {
                    Ok(size) => pager.set_page_size(size.max(1)),
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            _ => return Ok(()),
        }

        render(pager);
    }
}

fn run_config(hours_per_page: Option<usize>, timeout_ms: Option<u64>) -> Result<()> {
    let mut config = Config::load()?;
    let path = Config::config_file_path()?;

    if hours_per_page.is_none() && timeout_ms.is_none() {
        println!("timeout_ms = {}", config.timeout_ms);
        println!("hours_per_page = {}", config.hours_per_page);
        println!("file: {}", path.display());
        return Ok(());
    }

    if let Some(hours) = hours_per_page {
        anyhow::ensure!(hours > 0, "hours-per-page must be at least 1");
        config.hours_per_page = hours;
    }
    if let Some(ms) = timeout_ms {
        anyhow::ensure!(ms > 0, "timeout-ms must be at least 1");
        config.timeout_ms = ms;
    }

    config.save()?;
    println!("saved {}", path.display());

    Ok(())
}
