use weather_core::CommandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Metric(CommandKind),
}

impl BotCommand {
    /// Parse the leading `/command` (optionally `/command@botname`) of a text
    /// message. Returns `None` for anything that is not a known command.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);

        match name.to_lowercase().as_str() {
            "start" => Some(BotCommand::Start),
            "weather" => Some(BotCommand::Metric(CommandKind::Weather)),
            "wind" => Some(BotCommand::Metric(CommandKind::Wind)),
            "temp" => Some(BotCommand::Metric(CommandKind::Temperature)),
            "humidity" => Some(BotCommand::Metric(CommandKind::Humidity)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
        assert_eq!(
            BotCommand::parse("/weather"),
            Some(BotCommand::Metric(CommandKind::Weather))
        );
        assert_eq!(BotCommand::parse("/wind"), Some(BotCommand::Metric(CommandKind::Wind)));
        assert_eq!(
            BotCommand::parse("/temp"),
            Some(BotCommand::Metric(CommandKind::Temperature))
        );
        assert_eq!(
            BotCommand::parse("/humidity"),
            Some(BotCommand::Metric(CommandKind::Humidity))
        );
    }

    #[test]
    fn accepts_bot_mention_and_trailing_text() {
        assert_eq!(
            BotCommand::parse("/Temp@MyWeatherBot please"),
            Some(BotCommand::Metric(CommandKind::Temperature))
        );
        assert_eq!(BotCommand::parse("  /start  "), Some(BotCommand::Start));
    }

    #[test]
    fn rejects_non_commands() {
        assert_eq!(BotCommand::parse("weather"), None);
        assert_eq!(BotCommand::parse("/temperature"), None);
        assert_eq!(BotCommand::parse("/"), None);
        assert_eq!(BotCommand::parse(""), None);
        assert_eq!(BotCommand::parse("Paris /wind"), None);
    }
}
