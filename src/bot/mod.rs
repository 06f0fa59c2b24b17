//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `commands`: The command enum parsed from group messages
//! - `rules_handler`: Replies to `/rules` and `/regeln`
//! - `moderation_handler`: Invite link and banned sticker pack commands
//! - `sticker_guard`: Removes stickers from banned packs
//! - `ui_builder`: Creates keyboards and formats messages

pub mod commands;
pub mod moderation_handler;
pub mod rules_handler;
pub mod sticker_guard;
pub mod ui_builder;

use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::bot_config::BotConfig;

pub use commands::Command;
pub use ui_builder::{build_rules_reply, RulesReply};

pub type HandlerResult<T = ()> = anyhow::Result<T>;

/// Build the dispatch tree.
///
/// Everything is scoped to the managed group. Expects `Arc<BotConfig>`,
/// `Arc<Store>`, `Arc<LocalizationManager>` and `Arc<RulesReply>` as
/// dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let commands = dptree::entry()
        .filter_command::<Command>()
        .branch(
            dptree::filter(|cmd: Command| cmd.is_rules()).endpoint(rules_handler::rules_handler),
        )
        .branch(
            dptree::filter(|cmd: Command| cmd == Command::Help)
                .endpoint(moderation_handler::help_handler),
        )
        .branch(
            dptree::filter(|cmd: Command| cmd == Command::Invite)
                .endpoint(moderation_handler::invite_handler),
        )
        .branch(
            dptree::filter(|cmd: Command| cmd.requires_admin())
                .endpoint(moderation_handler::admin_command_handler),
        );

    let stickers = dptree::filter(|msg: Message| msg.sticker().is_some())
        .endpoint(sticker_guard::sticker_guard);

    Update::filter_message()
        .filter(|msg: Message, config: Arc<BotConfig>| config.is_managed_chat(msg.chat.id))
        .branch(commands)
        .branch(stickers)
}
