//! Rules command handler

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use tracing::info;

use super::ui_builder::RulesReply;
use super::HandlerResult;

/// Reply with the brief breakdown of the group rules.
///
/// Routing guarantees the message is a rules command sent in the managed
/// group; the payload is the same for every invocation.
pub async fn rules_handler(bot: Bot, msg: Message, rules: Arc<RulesReply>) -> HandlerResult {
    info!(chat_id = %msg.chat.id, message_id = ?msg.id, "Sending rules");

    bot.send_message(msg.chat.id, rules.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(rules.keyboard.clone())
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}
