//! Telegram side of the bot: sending through `teloxide` and the long-polling loop.

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    payloads::SendMessageSetters,
    prelude::*,
    types::{MessageId, ParseMode, ReplyParameters},
};
use weather_core::Coordinates;

use crate::{
    conversation::{ConversationDispatcher, Inbound, Payload},
    transport::{RenderMode, SessionId, Transport, TransportError},
};

#[derive(Debug, Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        session: SessionId,
        text: &str,
        mode: RenderMode,
    ) -> Result<(), TransportError> {
        let request = self.bot.send_message(ChatId(session.0), text);
        match mode {
            RenderMode::Plain => request.await?,
            RenderMode::Markdown => request.parse_mode(ParseMode::Markdown).await?,
        };
        Ok(())
    }

    async fn reply_to(
        &self,
        session: SessionId,
        message_id: i32,
        text: &str,
    ) -> Result<(), TransportError> {
        self.bot
            .send_message(ChatId(session.0), text)
            .reply_parameters(ReplyParameters::new(MessageId(message_id)))
            .await?;
        Ok(())
    }
}

impl From<&Message> for Inbound {
    fn from(msg: &Message) -> Self {
        let payload = if let Some(text) = msg.text() {
            Payload::Text(text.to_string())
        } else if let Some(location) = msg.location() {
            Payload::Location(Coordinates::rounded(location.latitude, location.longitude))
        } else {
            Payload::Unsupported
        };

        Inbound {
            session: SessionId(msg.chat.id.0),
            message_id: msg.id.0,
            payload,
        }
    }
}

/// Long-poll Telegram until Ctrl-C. Updates from one chat are handled in
/// order; a failure is logged for that update only.
pub async fn run_polling(bot: Bot, dispatcher: Arc<ConversationDispatcher<TelegramTransport>>) {
    let handler = Update::filter_message().endpoint(
        |msg: Message, dispatcher: Arc<ConversationDispatcher<TelegramTransport>>| async move {
            let inbound = Inbound::from(&msg);
            tracing::debug!(chat_id = msg.chat.id.0, message_id = msg.id.0, "Received message");

            if let Err(err) = dispatcher.handle(inbound).await {
                tracing::error!(chat_id = msg.chat.id.0, error = %err, "Failed to handle message");
            }
            respond(())
        },
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|_update| async {
            tracing::debug!("Ignoring non-message update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
