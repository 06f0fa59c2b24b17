//! # Dispatch Tests
//!
//! Runs updates through the real dispatch tree. The bot points at a closed
//! local port, so a handler that tries to talk to Telegram ends in a network
//! error; an update no branch accepts comes back as `ControlFlow::Continue`.

use anyhow::Result;
use serde_json::json;
use shmodbot::bot::{self, build_rules_reply};
use shmodbot::bot_config::{BotConfig, BOT_TOKEN_VAR, GROUP_ID_VAR};
use shmodbot::db::Store;
use shmodbot::localization::LocalizationManager;
use std::ops::ControlFlow;
use std::sync::Arc;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::Me;
use tempfile::TempDir;

const GROUP: i64 = -1001234567890;
const OTHER_CHAT: i64 = -1009999999999;

struct TestBot {
    deps: (Bot, Me, Arc<BotConfig>, Arc<Store>, Arc<LocalizationManager>),
    _temp_dir: TempDir,
}

async fn setup_test_bot() -> Result<TestBot> {
    let config = BotConfig::from_lookup(|var| match var {
        BOT_TOKEN_VAR => Some("123456:test-token".to_string()),
        GROUP_ID_VAR => Some(GROUP.to_string()),
        _ => None,
    })?;

    let temp_dir = tempfile::tempdir()?;
    let store = Store::open(&temp_dir.path().join("dispatch.db").to_string_lossy()).await?;
    store.initialize().await?;

    let bot = Bot::new(config.bot_token.clone())
        .set_api_url(reqwest::Url::parse("http://127.0.0.1:1/")?);

    let me: Me = serde_json::from_value(json!({
        "id": 123456,
        "is_bot": true,
        "first_name": "ShModBot",
        "username": "shmodbot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))?;

    let l10n = LocalizationManager::new(&config.language)?;

    Ok(TestBot {
        deps: (bot, me, Arc::new(config), Arc::new(store), Arc::new(l10n)),
        _temp_dir: temp_dir,
    })
}

fn message_update(chat_id: i64, content: serde_json::Value) -> Result<Update> {
    let mut message = json!({
        "message_id": 10,
        "date": 1700000000,
        "chat": {"id": chat_id, "type": "supergroup", "title": "Test group"},
        "from": {"id": 42, "is_bot": false, "first_name": "Alice"}
    });
    if let (Some(base), Some(content)) = (message.as_object_mut(), content.as_object()) {
        base.extend(content.clone());
    }

    // teloxide's `UpdateKind` deserializer needs borrowed keys, which
    // `serde_json::from_value` cannot provide, so parse from a string
    Ok(serde_json::from_str(
        &json!({
            "update_id": 1,
            "message": message
        })
        .to_string(),
    )?)
}

fn text_update(chat_id: i64, text: &str) -> Result<Update> {
    message_update(chat_id, json!({ "text": text }))
}

fn sticker_update(chat_id: i64, set_name: Option<&str>) -> Result<Update> {
    let mut sticker = json!({
        "file_id": "CAACAgIAAx0",
        "file_unique_id": "AgADBQAD",
        "type": "regular",
        "width": 512,
        "height": 512,
        "is_animated": false,
        "is_video": false
    });
    if let Some(set_name) = set_name {
        sticker["set_name"] = json!(set_name);
    }
    message_update(chat_id, json!({ "sticker": sticker }))
}

async fn dispatch(test_bot: &TestBot, update: Update) -> ControlFlow<Result<()>> {
    let (bot, me, config, store, l10n) = test_bot.deps.clone();
    let rules = Arc::new(build_rules_reply(&config, &l10n));

    match bot::schema()
        .dispatch(dptree::deps![update, bot, me, config, store, l10n, rules])
        .await
    {
        ControlFlow::Break(result) => ControlFlow::Break(result),
        ControlFlow::Continue(_) => ControlFlow::Continue(()),
    }
}

/// A handler ran and tried to reach Telegram
fn attempted_request(flow: &ControlFlow<Result<()>>) -> bool {
    matches!(flow, ControlFlow::Break(Err(_)))
}

fn not_handled(flow: &ControlFlow<Result<()>>) -> bool {
    matches!(flow, ControlFlow::Continue(()))
}

#[tokio::test]
async fn test_rules_aliases_answered_in_managed_group() -> Result<()> {
    let test_bot = setup_test_bot().await?;

    for text in ["/rules", "/regeln", "/rules@shmodbot"] {
        let flow = dispatch(&test_bot, text_update(GROUP, text)?).await;
        assert!(attempted_request(&flow), "{text} was not answered");
    }
    Ok(())
}

#[tokio::test]
async fn test_rules_ignored_in_other_chat() -> Result<()> {
    let test_bot = setup_test_bot().await?;

    for text in ["/rules", "/regeln"] {
        let flow = dispatch(&test_bot, text_update(OTHER_CHAT, text)?).await;
        assert!(not_handled(&flow), "{text} answered outside the group");
    }
    Ok(())
}

#[tokio::test]
async fn test_other_texts_ignored_in_managed_group() -> Result<()> {
    let test_bot = setup_test_bot().await?;

    for text in ["/Rules", "/REGELN", "/rule", "rules", "hello everyone", "/rules@otherbot"] {
        let flow = dispatch(&test_bot, text_update(GROUP, text)?).await;
        assert!(not_handled(&flow), "{text} should not be handled");
    }
    Ok(())
}

#[tokio::test]
async fn test_banned_sticker_deleted_in_managed_group() -> Result<()> {
    let test_bot = setup_test_bot().await?;
    test_bot.deps.3.add_banned_pack("spam_pack").await?;

    // Set names are matched case-insensitively
    let flow = dispatch(&test_bot, sticker_update(GROUP, Some("Spam_Pack"))?).await;
    assert!(attempted_request(&flow), "banned sticker was not deleted");
    Ok(())
}

#[tokio::test]
async fn test_allowed_stickers_left_alone() -> Result<()> {
    let test_bot = setup_test_bot().await?;
    test_bot.deps.3.add_banned_pack("spam_pack").await?;

    let flow = dispatch(&test_bot, sticker_update(GROUP, Some("nice_pack"))?).await;
    assert!(matches!(flow, ControlFlow::Break(Ok(()))));

    let flow = dispatch(&test_bot, sticker_update(GROUP, None)?).await;
    assert!(matches!(flow, ControlFlow::Break(Ok(()))));
    Ok(())
}

#[tokio::test]
async fn test_banned_sticker_ignored_in_other_chat() -> Result<()> {
    let test_bot = setup_test_bot().await?;
    test_bot.deps.3.add_banned_pack("spam_pack").await?;

    let flow = dispatch(&test_bot, sticker_update(OTHER_CHAT, Some("spam_pack"))?).await;
    assert!(not_handled(&flow));
    Ok(())
}
