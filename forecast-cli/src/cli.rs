use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    CityRequest, Config, FetchError, ForecastFetcher, ForecastKind, UnitSystem,
    config::DEFAULT_BASE_URL,
};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;

use crate::output::Rendered;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "OpenWeather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Unit system requested from the API: standard, metric or imperial.
    #[arg(long, global = true, value_parser = parse_units, default_value_t = UnitSystem::Metric)]
    pub units: UnitSystem,

    /// Print the normalized record as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log requests and parsing at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and base URL.
    Configure,

    /// Current weather for one city.
    Current {
        /// OpenWeather city id, e.g. 2643743 for London.
        id: u64,
    },

    /// Daily forecast for one city.
    Daily {
        /// OpenWeather city id.
        id: u64,
    },

    /// Current weather for several cities in one request.
    Group {
        /// City ids, space or comma separated.
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<u64>,
    },
}

fn parse_units(value: &str) -> Result<UnitSystem, FetchError> {
    UnitSystem::try_from(value)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let (city, kind) = match self.command {
            Command::Configure => return configure(),
            Command::Current { id } => (CityRequest::Single(id), ForecastKind::Current),
            Command::Daily { id } => (CityRequest::Single(id), ForecastKind::Daily),
            Command::Group { ids } => (CityRequest::Many(ids), ForecastKind::Group),
        };

        let config = Config::load()?.with_process_env();
        debug!(configured = config.is_configured(), "Loaded configuration");
        let fetcher = ForecastFetcher::from_config(&config)?;

        let forecast = fetcher.fetch(city, kind, self.units).await?;

        if self.json {
            let text = serde_json::to_string_pretty(&forecast)
                .context("Failed to serialize forecast to JSON")?;
            println!("{text}");
        } else {
            print!("{}", Rendered::new(&forecast, self.units));
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let current_url = config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Text::new("API base URL:").with_default(&current_url).prompt()?;

    config.api_key = Some(api_key.trim().to_string());
    config.base_url = Some(base_url.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
