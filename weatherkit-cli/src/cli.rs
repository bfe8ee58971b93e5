use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weatherkit_core::{
    Config, DataSet, Location,
    service::{full_queries, queries_for},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherkit", version, about = "WeatherKit CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherKit token and default language/country.
    Configure,

    /// Show weather for a location.
    Show {
        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Country code for alerts and availability, e.g. "US".
        #[arg(long)]
        country: Option<String>,

        /// Data sets to fetch, comma separated; all of them if absent.
        #[arg(long, value_delimiter = ',')]
        include: Vec<DataSet>,

        /// Language tag overriding the configured one.
        #[arg(long)]
        language: Option<String>,

        /// Print the merged result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the data sets available for a location.
    Availability {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long)]
        country: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { lat, lon, country, include, language, json } => {
                let mut cfg = Config::load()?;
                if language.is_some() {
                    cfg.language = language;
                }

                let needs_country = include.is_empty()
                    || include
                        .iter()
                        .any(|ds| matches!(ds, DataSet::WeatherAlerts | DataSet::Availability));
                let country_code = if needs_country {
                    cfg.country_code_or(country.as_deref())?.to_string()
                } else {
                    String::new()
                };

                let now = Utc::now();
                let queries = if include.is_empty() {
                    full_queries(&country_code, now)
                } else {
                    queries_for(&include, &country_code, now)
                };

                let location = Location::new(lat, lon);
                let weather = cfg
                    .weather_service()?
                    .weather_including(location, &queries)
                    .await
                    .with_context(|| format!("Failed to fetch weather for {location}"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                } else {
                    print!("{}", render::weather(location, &weather));
                }
            }
            Command::Availability { lat, lon, country } => {
                let cfg = Config::load()?;
                let country_code = cfg.country_code_or(country.as_deref())?;

                let location = Location::new(lat, lon);
                let data_sets = cfg
                    .weather_service()?
                    .availability(location, country_code)
                    .await
                    .with_context(|| format!("Failed to fetch availability for {location}"))?;

                print!("{}", render::availability(location, &data_sets));
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let token = Password::new("WeatherKit token (JWT):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read token")?;

    let language = Text::new("Language:")
        .with_default(&cfg.language().to_string())
        .prompt()
        .context("Failed to read language")?;

    let country = Text::new("Default country code (empty for none):")
        .with_default(cfg.country_code.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read country code")?;

    cfg.token = Some(token.trim().to_string());
    cfg.language = Some(language.trim().to_string());
    cfg.country_code = Some(country.trim().to_uppercase()).filter(|c| !c.is_empty());

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
