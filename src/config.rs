use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::core::feed::types::MalformedItemPolicy;

pub const ENV_FILE: &str = ".env.local";
pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";

const ENDPOINT_KEY: &str = "NEWSAPP_ENDPOINT";
const QUERY_KEY: &str = "NEWSAPP_QUERY";
const SHOW_TAGS_KEY: &str = "NEWSAPP_SHOW_TAGS";
const API_KEY_KEY: &str = "NEWSAPP_API_KEY";
const CONNECT_TIMEOUT_KEY: &str = "NEWSAPP_CONNECT_TIMEOUT_SECS";
const READ_TIMEOUT_KEY: &str = "NEWSAPP_READ_TIMEOUT_SECS";
const MALFORMED_ITEMS_KEY: &str = "NEWSAPP_MALFORMED_ITEMS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { key: &'static str, value: String },
    #[error("NEWSAPP_MALFORMED_ITEMS must be `truncate` or `skip`, got {0:?}")]
    InvalidPolicy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: String,
    pub query: String,
    pub show_tags: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub malformed_items: MalformedItemPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: "debates".to_string(),
            show_tags: "contributor".to_string(),
            api_key: "test".to_string(),
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
            malformed_items: MalformedItemPolicy::Truncate,
        }
    }
}

impl AppConfig {
    /// Reads `.env.local` when present, then lets the process environment override it.
    pub fn load() -> Result<Self, ConfigError> {
        let process_vars = std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        });
        Self::load_from(Path::new(ENV_FILE), process_vars)
    }

    /// Values in `env_file` first, then `process_vars` on top.
    pub fn load_from<I>(env_file: &Path, process_vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars = read_env_file(env_file)?;
        vars.extend(process_vars);
        Self::from_vars(vars)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with("NEWSAPP_"))
            .collect();
        let text = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        };

        let mut config = Self::default();
        if let Some(endpoint) = text(ENDPOINT_KEY) {
            config.endpoint = endpoint;
        }
        if let Some(query) = text(QUERY_KEY) {
            config.query = query;
        }
        if let Some(show_tags) = text(SHOW_TAGS_KEY) {
            config.show_tags = show_tags;
        }
        if let Some(api_key) = text(API_KEY_KEY) {
            config.api_key = api_key;
        }
        if let Some(raw) = text(CONNECT_TIMEOUT_KEY) {
            config.connect_timeout = parse_seconds(CONNECT_TIMEOUT_KEY, raw)?;
        }
        if let Some(raw) = text(READ_TIMEOUT_KEY) {
            config.read_timeout = parse_seconds(READ_TIMEOUT_KEY, raw)?;
        }
        if let Some(raw) = text(MALFORMED_ITEMS_KEY) {
            config.malformed_items = parse_policy(&raw)?;
        }
        Ok(config)
    }

    /// The search URL with `q`, `show-tags` and `api-key` attached.
    ///
    /// An endpoint that does not parse is returned untouched so the fetch
    /// reports it like any other malformed URL.
    pub fn request_url(&self) -> String {
        match Url::parse_with_params(
            &self.endpoint,
            [
                ("q", self.query.as_str()),
                ("show-tags", self.show_tags.as_str()),
                ("api-key", self.api_key.as_str()),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => self.endpoint.clone(),
        }
    }
}

pub fn parse_policy(raw: &str) -> Result<MalformedItemPolicy, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "truncate" => Ok(MalformedItemPolicy::Truncate),
        "skip" => Ok(MalformedItemPolicy::Skip),
        _ => Err(ConfigError::InvalidPolicy(raw.to_string())),
    }
}

fn parse_seconds(key: &'static str, raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidSeconds { key, value: raw }),
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(error) if error.not_found() => return Ok(HashMap::new()),
        Err(error) => return Err(error.into()),
    };
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}
