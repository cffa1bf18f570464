use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use teloxide::Bot;
use weather_core::{CommandKind, Credentials, Settings, WeatherService, render};

use crate::{
    conversation::ConversationDispatcher,
    telegram::{self, TelegramTransport},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-bot", version, about = "Telegram weather bot")]
pub struct Cli {
    /// Settings file (TOML). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the bot and long-poll Telegram for updates (default).
    Run,

    /// Look up a single reading and print it.
    Show {
        /// One of: weather, wind, temp, humidity.
        kind: CommandKind,

        /// Place name; asked for interactively when absent.
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load(self.config.as_deref())?;

        match self.command.unwrap_or(Command::Run) {
            Command::Run => run_bot(settings).await,
            Command::Show { kind, location } => show(settings, kind, location).await,
        }
    }
}

async fn run_bot(settings: Settings) -> anyhow::Result<()> {
    let credentials = Credentials::from_env()?;
    let weather = WeatherService::from_settings(&settings, credentials.weather_api_key)?;

    let bot = Bot::new(credentials.bot_token);
    let dispatcher = Arc::new(ConversationDispatcher::new(
        TelegramTransport::new(bot.clone()),
        weather,
    ));

    tracing::info!(
        geocoder = %settings.geocoder_url,
        weather = %settings.weather_url,
        timeout_secs = settings.request_timeout_secs,
        "Starting weather bot"
    );
    telegram::run_polling(bot, dispatcher).await;
    tracing::info!("Polling stopped");

    Ok(())
}

async fn show(settings: Settings, kind: CommandKind, location: Option<String>) -> anyhow::Result<()> {
    let api_key = Credentials::weather_api_key_from_env()?;
    let weather = WeatherService::from_settings(&settings, api_key)?;

    let location = match location {
        Some(location) => location,
        None => inquire::Text::new(kind.prompt().trim_end())
            .prompt()
            .context("Failed to read location")?,
    };

    match weather.lookup(&location).await {
        Ok(record) => {
            if let Some(name) = &record.location_name {
                println!("{name}");
            }
            if let Some(at) = record.observed_at {
                let local = at.with_timezone(&chrono::Local);
                println!("Forecast period: {}", local.format("%Y-%m-%d %H:%M"));
            }
            println!("{}", render(&record, kind));
            Ok(())
        }
        Err(err) => {
            let hint = err.user_message();
            Err(err).context(hint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["weather-bot"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn show_parses_kind_and_location() {
        let cli = Cli::try_parse_from(["weather-bot", "show", "temp", "Paris, France"]).unwrap();
        match cli.command {
            Some(Command::Show { kind, location }) => {
                assert_eq!(kind, CommandKind::Temperature);
                assert_eq!(location.as_deref(), Some("Paris, France"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["weather-bot", "run", "--config", "bot.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["weather-bot", "show", "pressure"]).is_err());
    }
}
