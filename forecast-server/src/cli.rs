use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, service_from_config};
use inquire::Password;

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-server", version, about = "City weather forecast proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /api/weather?city=<name>` over HTTP.
    Serve {
        /// Listen address, e.g. "0.0.0.0:5000". Overrides config and environment.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the geocoding API key in the config file.
    Configure,

    /// Print the forecast for a city as JSON.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let mut config = Config::load()?;
                if let Some(bind) = bind {
                    config.server.bind = bind;
                }
                config.validate()?;

                let addr = config.bind_addr()?;
                let service = service_from_config(&config)?;
                server::serve(addr, service).await
            }
            Command::Configure => {
                let path = Config::config_file_path()?;

                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;
                Config::store_api_key(&path, &api_key)?;

                println!("Saved configuration to {}", path.display());
                Ok(())
            }
            Command::Show { city } => {
                let config = Config::load()?;
                config.validate()?;

                let service = service_from_config(&config)?;
                let forecast = service.forecast_for_city(Some(&city)).await?;

                let json = serde_json::to_string_pretty(&forecast)
                    .context("Failed to serialize forecast")?;
                println!("{json}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_with_bind_override() {
        let cli = Cli::try_parse_from(["forecast-server", "serve", "--bind", "0.0.0.0:8080"]).unwrap();

        match cli.command {
            Command::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["forecast-server", "show"]).is_err());
    }
}
