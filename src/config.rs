use dotenvy::dotenv;
use std::{env, time::Duration};
use teloxide::types::{ChatId, Recipient};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_EXPLORER_URL: &str = "https://soneium.blockscout.com";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnv(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat: Recipient,
    pub explorer_url: String, // no trailing slash
    pub poll_interval: Duration,
    pub explorer_timeout: Option<Duration>,
}

pub fn load() -> Result<Config, ConfigError> {
    dotenv().ok(); // ✅ Load from .env file

    let cfg = from_lookup(|key| env::var(key).ok())?;

    info!(
        "Loaded config: explorer={} interval={:?} timeout={:?} chat={:?}",
        cfg.explorer_url, cfg.poll_interval, cfg.explorer_timeout, cfg.chat
    );

    Ok(cfg)
}

/// Build a `Config` from an arbitrary key lookup.
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let bot_token = non_empty("BOT_TOKEN").ok_or(ConfigError::MissingEnv("BOT_TOKEN"))?;

    let chat_raw = non_empty("CHAT_ID").ok_or(ConfigError::MissingEnv("CHAT_ID"))?;
    let chat = parse_recipient(&chat_raw).ok_or(ConfigError::InvalidValue {
        key: "CHAT_ID",
        value: chat_raw.clone(),
    })?;

    let explorer_url = non_empty("EXPLORER_URL")
        .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    // ✅ Poll interval (default: 30s, zero falls back too)
    let poll_secs = non_empty("POLL_INTERVAL_SECS")
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    let explorer_timeout = match non_empty("EXPLORER_TIMEOUT_SECS") {
        None => None,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "EXPLORER_TIMEOUT_SECS",
                    value: raw,
                })
            }
        },
    };

    Ok(Config {
        bot_token,
        chat,
        explorer_url,
        poll_interval: Duration::from_secs(poll_secs),
        explorer_timeout,
    })
}

/// Numeric ids are chats, `@name` is a public channel.
fn parse_recipient(raw: &str) -> Option<Recipient> {
    if let Ok(id) = raw.parse::<i64>() {
        return Some(Recipient::Id(ChatId(id)));
    }
    if raw.len() > 1 && raw.starts_with('@') {
        return Some(Recipient::ChannelUsername(raw.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = from_lookup(lookup(&[("CHAT_ID", "42")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnv("BOT_TOKEN"));

        let err = from_lookup(lookup(&[("BOT_TOKEN", "  "), ("CHAT_ID", "42")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnv("BOT_TOKEN"));
    }

    #[test]
    fn missing_chat_is_fatal() {
        let err = from_lookup(lookup(&[("BOT_TOKEN", "t")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnv("CHAT_ID"));
    }

    #[test]
    fn defaults_apply() {
        let cfg = from_lookup(lookup(&[("BOT_TOKEN", "t"), ("CHAT_ID", "-100123")])).unwrap();
        assert_eq!(cfg.bot_token, "t");
        assert_eq!(cfg.chat, Recipient::Id(ChatId(-100123)));
        assert_eq!(cfg.explorer_url, DEFAULT_EXPLORER_URL);
        assert_eq!(cfg.poll_interval, Duration::from_secs(30));
        assert_eq!(cfg.explorer_timeout, None);
    }

    #[test]
    fn overrides_and_channel_username() {
        let cfg = from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("CHAT_ID", "@alerts"),
            ("EXPLORER_URL", "https://explorer.example/"),
            ("POLL_INTERVAL_SECS", "5"),
            ("EXPLORER_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.chat, Recipient::ChannelUsername("@alerts".to_string()));
        assert_eq!(cfg.explorer_url, "https://explorer.example");
        assert_eq!(cfg.poll_interval, Duration::from_secs(5));
        assert_eq!(cfg.explorer_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn bad_interval_falls_back_but_bad_chat_fails() {
        let cfg = from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("CHAT_ID", "1"),
            ("POLL_INTERVAL_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_secs(30));

        let err = from_lookup(lookup(&[("BOT_TOKEN", "t"), ("CHAT_ID", "general")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "CHAT_ID", .. }));
    }
}
