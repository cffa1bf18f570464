use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, time::Duration};

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable holding the OpenWeather API key.
pub const WEATHER_TOKEN_VAR: &str = "WEATHER_TOKEN";

/// The two secrets the bot needs. Only ever read from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub bot_token: String,
    pub weather_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("weather_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bot_token: require(&lookup, BOT_TOKEN_VAR)?,
            weather_api_key: require(&lookup, WEATHER_TOKEN_VAR)?,
        })
    }

    /// The weather key alone, for commands that never talk to Telegram.
    pub fn weather_api_key_from_env() -> Result<String> {
        require(&|name: &str| std::env::var(name).ok(), WEATHER_TOKEN_VAR)
    }
}

fn require<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(_) => Err(anyhow!(
            "Environment variable {name} is set but empty.\n\
             Hint: export {name}=<value> or add it to a .env file."
        )),
        None => Err(anyhow!(
            "Environment variable {name} is not set.\n\
             Hint: export {name}=<value> or add it to a .env file."
        )),
    }
}

/// Non-secret knobs, optionally read from a TOML file.
///
/// Example TOML:
/// ```toml
/// geocoder_url = "https://nominatim.openstreetmap.org"
/// weather_url = "https://api.openweathermap.org"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geocoder_url: String,
    pub weather_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            weather_url: "https://api.openweathermap.org".to_string(),
            request_timeout_secs: 10,
            user_agent: concat!("weather-bot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit` if given, else from the platform config
    /// file if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_file_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            // First run: no config file, use defaults.
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if settings.request_timeout_secs == 0 {
            return Err(anyhow!(
                "Invalid config file {}: request_timeout_secs must be greater than zero",
                path.display()
            ));
        }

        Ok(settings)
    }

    /// Path to the platform config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-bot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP client shared by the geocoder and the forecast provider.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn credentials_read_both_variables() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (WEATHER_TOKEN_VAR, " owm-key \n"),
        ]))
        .expect("both variables are present");

        assert_eq!(creds.bot_token, "123:abc");
        assert_eq!(creds.weather_api_key, "owm-key");
    }

    #[test]
    fn missing_bot_token_names_the_variable() {
        let err = Credentials::from_lookup(lookup_from(&[(WEATHER_TOKEN_VAR, "k")])).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN is not set"));
    }

    #[test]
    fn blank_weather_token_is_rejected() {
        let err = Credentials::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "t"),
            (WEATHER_TOKEN_VAR, "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("WEATHER_TOKEN is set but empty"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials {
            bot_token: "secret-bot".into(),
            weather_api_key: "secret-key".into(),
        };
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn settings_file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weather_url = \"http://localhost:9000\"").unwrap();
        writeln!(file, "request_timeout_secs = 3").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.weather_url, "http://localhost:9000");
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.geocoder_url, Settings::default().geocoder_url);
    }

    #[test]
    fn explicit_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn default_settings_build_a_client() {
        assert!(Settings::default().http_client().is_ok());
    }
}
