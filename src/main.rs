use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shmodbot::bot::{self, build_rules_reply};
use shmodbot::bot_config::BotConfig;
use shmodbot::db::Store;
use shmodbot::localization::LocalizationManager;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting ShModBot");

    let config = BotConfig::from_env().context("Failed to load configuration")?;

    info!(
        database_url = %config.database_url,
        group_id = %config.group_id,
        "Initializing database"
    );

    let store = Store::open(&config.database_url)
        .await
        .context("Failed to open database")?;
    store
        .initialize()
        .await
        .context("Failed to initialize database schema")?;

    let l10n = LocalizationManager::new(&config.language).context("Failed to load translations")?;
    let rules = build_rules_reply(&config, &l10n);

    // Initialize the bot
    let bot = Bot::new(config.bot_token.clone());

    info!(language = %l10n.language(), "Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![
            Arc::new(config),
            Arc::new(store),
            Arc::new(l10n),
            Arc::new(rules)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
