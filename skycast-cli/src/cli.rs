use clap::{Parser, Subcommand};
use skycast_core::dashboard::{Dashboard, Trigger};
use skycast_core::forecast::OpenMeteoClient;
use skycast_core::geocode::NominatimClient;
use skycast_core::model::UnitPreference;
use skycast_core::Config;

use crate::render::TextRenderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City-search weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard once for a city.
    Show {
        /// City name, free text, e.g. "rotterdam" or "los angeles, ca".
        city: String,

        /// Unit system: C (celsius) or F (fahrenheit). Defaults to the
        /// configured preference.
        #[arg(long)]
        units: Option<String>,
    },

    /// Interactive dashboard: type a city to search, ":units" to toggle,
    /// ":quit" to exit.
    Dashboard,

    /// Set the default city and unit preference.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, units } => show(city, units).await,
            Command::Dashboard => dashboard_loop().await,
            Command::Configure => configure(),
        }
    }
}

type CliDashboard = Dashboard<NominatimClient, OpenMeteoClient, TextRenderer>;

fn build_dashboard(units: UnitPreference) -> anyhow::Result<CliDashboard> {
    Ok(Dashboard::new(
        NominatimClient::new()?,
        OpenMeteoClient::new()?,
        TextRenderer,
        units,
    ))
}

async fn show(city: String, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let units = match units {
        Some(s) => UnitPreference::try_from(s.as_str())?,
        None => config.units,
    };

    let mut dashboard = build_dashboard(units)?;
    dashboard.handle(Trigger::Search(city)).await;

    Ok(())
}

async fn dashboard_loop() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut units = config.units;
    let mut dashboard = build_dashboard(units)?;

    if let Some(city) = config.default_city() {
        dashboard.handle(Trigger::Search(city.to_string())).await;
    }

    loop {
        let line = inquire::Text::new("search:")
            .with_help_message("city name  |  :units to toggle  |  :quit to exit")
            .prompt()?;

        match line.trim() {
            "" => {}
            ":quit" | ":q" => break,
            ":units" => {
                units = units.toggle();
                println!("units: {units}");
                dashboard.handle(Trigger::Units(units)).await;
            }
            query => dashboard.handle(Trigger::Search(query.to_string())).await,
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = inquire::Text::new("Default city (empty for none):")
        .with_initial_value(config.default_city().unwrap_or(""))
        .prompt()?;
    config.set_default_city(Some(city));

    let units = inquire::Select::new("Units:", UnitPreference::all().to_vec()).prompt()?;
    config.set_units(units);

    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());

    Ok(())
}
