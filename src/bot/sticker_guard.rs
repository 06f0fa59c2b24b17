//! Deletes stickers from banned packs posted in the managed group

use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::db::Store;

use super::HandlerResult;

/// Set name of the sticker carried by `msg`, if any
pub fn sticker_set_name(msg: &Message) -> Option<&str> {
    msg.sticker().and_then(|sticker| sticker.set_name.as_deref())
}

pub async fn sticker_guard(bot: Bot, msg: Message, store: Arc<Store>) -> HandlerResult {
    let Some(set_name) = sticker_set_name(&msg) else {
        debug!(chat_id = %msg.chat.id, "Sticker without a set, ignoring");
        return Ok(());
    };

    if store.is_pack_banned(set_name).await? {
        info!(
            chat_id = %msg.chat.id,
            user_id = ?msg.from.as_ref().map(|u| u.id),
            set_name = %set_name,
            "Deleting sticker from banned pack"
        );
        bot.delete_message(msg.chat.id, msg.id).await?;
    }

    Ok(())
}
