//! Two-step conversation: a command asks for a location, the next message
//! from the same chat answers it.

use parking_lot::Mutex;
use std::collections::HashMap;
use weather_core::{
    CommandKind, Coordinates, ForecastRecord, GeocodeError, LookupError, WeatherService, render,
};

use crate::{
    command::BotCommand,
    transport::{RenderMode, SessionId, Transport, TransportError},
};

pub const WELCOME_MESSAGE: &str = "Hello, what do you want to search for? I can tell you what \
the weather is like anywhere in the world as well temperature and humidity.\n To start, attach \
a location or send me the name of a city and country.";

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Location(Coordinates),
    Unsupported,
}

/// One incoming message, already stripped of platform types.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub session: SessionId,
    pub message_id: i32,
    pub payload: Payload,
}

/// Owns the per-chat pending step. A chat is idle unless it has an entry.
pub struct ConversationDispatcher<T> {
    transport: T,
    weather: WeatherService,
    pending: Mutex<HashMap<SessionId, CommandKind>>,
}

impl<T: Transport> ConversationDispatcher<T> {
    pub fn new(transport: T, weather: WeatherService) -> Self {
        Self {
            transport,
            weather,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// The metric a chat is waiting to receive a location for, if any.
    #[cfg(test)]
    pub fn pending(&self, session: SessionId) -> Option<CommandKind> {
        self.pending.lock().get(&session).copied()
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn handle(&self, inbound: Inbound) -> Result<(), TransportError> {
        // Commands always win over a pending step.
        if let Payload::Text(text) = &inbound.payload {
            if let Some(command) = BotCommand::parse(text) {
                return self.on_command(inbound.session, command).await;
            }
        }

        // Consumed before the lookup so the chat is idle again whatever happens.
        let pending = self.pending.lock().remove(&inbound.session);

        match pending {
            Some(kind) => self.on_location(inbound, kind).await,
            None => self.on_idle(inbound).await,
        }
    }

    async fn on_command(&self, session: SessionId, command: BotCommand) -> Result<(), TransportError> {
        match command {
            BotCommand::Start => {
                self.pending.lock().remove(&session);
                self.transport
                    .send_message(session, WELCOME_MESSAGE, RenderMode::Plain)
                    .await
            }
            BotCommand::Metric(kind) => {
                self.transport
                    .send_message(session, kind.prompt(), RenderMode::Markdown)
                    .await?;

                let replaced = self.pending.lock().insert(session, kind);
                if let Some(previous) = replaced {
                    tracing::debug!(chat_id = %session, %previous, %kind, "Replaced pending step");
                }
                Ok(())
            }
        }
    }

    async fn on_location(&self, inbound: Inbound, kind: CommandKind) -> Result<(), TransportError> {
        let result = match inbound.payload {
            Payload::Text(text) => self.weather.lookup(&text).await,
            Payload::Location(coords) => self.weather.lookup_at(coords).await,
            Payload::Unsupported => {
                tracing::warn!(chat_id = %inbound.session, "Location not found for non-text input");
                Err(GeocodeError::NotFound(String::new()).into())
            }
        };

        self.send_result(inbound.session, kind, result).await
    }

    async fn on_idle(&self, inbound: Inbound) -> Result<(), TransportError> {
        match inbound.payload {
            Payload::Text(text) => {
                self.transport
                    .reply_to(inbound.session, inbound.message_id, &text)
                    .await
            }
            Payload::Location(coords) => {
                let result = self.weather.lookup_at(coords).await;
                self.send_result(inbound.session, CommandKind::Weather, result)
                    .await
            }
            Payload::Unsupported => {
                tracing::debug!(chat_id = %inbound.session, "Ignoring unsupported message");
                Ok(())
            }
        }
    }

    async fn send_result(
        &self,
        session: SessionId,
        kind: CommandKind,
        result: Result<ForecastRecord, LookupError>,
    ) -> Result<(), TransportError> {
        match result {
            Ok(record) => {
                let text = format!(
                    "{}\n{}",
                    kind.announcement(),
                    render(&record, kind).to_markdown()
                );
                self.transport
                    .send_message(session, &text, RenderMode::Markdown)
                    .await
            }
            Err(err) => {
                tracing::info!(chat_id = %session, %kind, error = %err, "Lookup did not produce a reading");
                self.transport
                    .send_message(session, err.user_message(), RenderMode::Plain)
                    .await
            }
        }
    }
}
