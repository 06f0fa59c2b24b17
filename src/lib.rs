//! # ShModBot
//!
//! A moderation bot for a single Telegram group. It answers the rules command
//! with a canned reply and keeps the group's invite link and its banned
//! sticker packs in a local SQLite database.

pub mod bot;
pub mod bot_config;
pub mod db;
pub mod db_errors;
pub mod localization;
