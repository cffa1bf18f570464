//! Binary crate for the `weather-bot` Telegram bot.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading secrets
//! - The two-step command conversation
//! - Talking to Telegram

use clap::Parser;

mod cli;
mod command;
mod conversation;
mod logging;
mod telegram;
mod transport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; variables may come from the environment.
    dotenvy::dotenv().ok();
    logging::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
