//! # Bot Configuration Module
//!
//! This module loads the runtime configuration of the bot from the
//! environment (optionally seeded from a `.env` file by the caller).

use std::env;

use teloxide::types::ChatId;
use thiserror::Error;

// Environment variable names
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const GROUP_ID_VAR: &str = "GROUP_ID";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const RULES_ONLINE_URL_VAR: &str = "RULES_ONLINE_URL";
pub const RULES_CHAT_URL_VAR: &str = "RULES_CHAT_URL";
pub const LANGUAGE_VAR: &str = "BOT_LANGUAGE";

// Defaults for the optional variables
pub const DEFAULT_DATABASE_URL: &str = "shmodbot.db";
pub const DEFAULT_RULES_ONLINE_URL: &str = "https://t.me/shmodbot_rules";
pub const DEFAULT_RULES_CHAT_URL: &str = "https://t.me/c/0/1";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration of the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub bot_token: String,
    /// The one group this bot moderates
    pub group_id: ChatId,
    /// Path of the SQLite database file
    pub database_url: String,
    /// Telegram post holding the full rules
    pub rules_online_url: reqwest::Url,
    /// Link to the rules message pinned in the group
    pub rules_chat_url: reqwest::Url,
    /// Language of the bot replies
    pub language: String,
}

impl BotConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let bot_token = value(BOT_TOKEN_VAR).ok_or(ConfigError::Missing(BOT_TOKEN_VAR))?;

        let group_id = value(GROUP_ID_VAR)
            .ok_or(ConfigError::Missing(GROUP_ID_VAR))?
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|e| ConfigError::Invalid {
                var: GROUP_ID_VAR,
                reason: e.to_string(),
            })?;

        let database_url =
            value(DATABASE_URL_VAR).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let rules_online_url = parse_url(
            RULES_ONLINE_URL_VAR,
            value(RULES_ONLINE_URL_VAR).as_deref().unwrap_or(DEFAULT_RULES_ONLINE_URL),
        )?;
        let rules_chat_url = parse_url(
            RULES_CHAT_URL_VAR,
            value(RULES_CHAT_URL_VAR).as_deref().unwrap_or(DEFAULT_RULES_CHAT_URL),
        )?;

        let language = value(LANGUAGE_VAR)
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(Self {
            bot_token,
            group_id,
            database_url,
            rules_online_url,
            rules_chat_url,
            language,
        })
    }

    /// Whether `chat_id` is the managed group
    pub fn is_managed_chat(&self, chat_id: ChatId) -> bool {
        self.group_id == chat_id
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<reqwest::Url, ConfigError> {
    reqwest::Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}
