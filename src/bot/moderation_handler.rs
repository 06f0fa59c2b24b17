//! Moderation commands backed by the store: invite link and banned sticker packs

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;
use tracing::{info, warn};

use crate::db::Store;
use crate::localization::LocalizationManager;

use super::commands::Command;
use super::ui_builder::format_banned_packs;
use super::HandlerResult;

/// Prefix of sticker set share links
const ADD_STICKERS_PREFIX: &str = "t.me/addstickers/";

async fn reply(bot: &Bot, msg: &Message, text: String) -> HandlerResult {
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Admins posting anonymously appear as the group itself
pub fn is_anonymous_admin(msg: &Message) -> bool {
    msg.sender_chat.as_ref().map(|chat| chat.id) == Some(msg.chat.id)
}

/// Whether the sender of `msg` administers the chat
async fn is_admin(bot: &Bot, msg: &Message) -> HandlerResult<bool> {
    if is_anonymous_admin(msg) {
        return Ok(true);
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(false);
    };

    let admins = bot.get_chat_administrators(msg.chat.id).await?;
    Ok(admins.iter().any(|member| member.user.id == user.id))
}

/// Turn a command argument into a sticker set name.
///
/// Accepts either the bare name or a `t.me/addstickers/<name>` link.
pub fn normalize_set_name(arg: &str) -> Option<String> {
    let arg = arg.trim();
    let name = match arg.find(ADD_STICKERS_PREFIX) {
        Some(pos) => &arg[pos + ADD_STICKERS_PREFIX.len()..],
        None => arg,
    };
    let name = name.trim_end_matches('/');

    if name.is_empty() || name.contains(char::is_whitespace) {
        None
    } else {
        Some(name.to_string())
    }
}

/// Set name from the argument, else from the sticker the command replies to
pub fn resolve_set_name(arg: &str, msg: &Message) -> Option<String> {
    normalize_set_name(arg).or_else(|| {
        msg.reply_to_message()
            .and_then(|replied| replied.sticker())
            .and_then(|sticker| sticker.set_name.clone())
    })
}

pub async fn help_handler(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Reply with the stored invite link
pub async fn invite_handler(
    bot: Bot,
    msg: Message,
    store: Arc<Store>,
    l10n: Arc<LocalizationManager>,
) -> HandlerResult {
    let text = match store.get_invite_link().await {
        Ok(link) => {
            l10n.t_args("invite-current", &[("link", html::escape(&link).as_str())])
        }
        Err(e) if e.is_not_found() => l10n.t("invite-not-set"),
        Err(e) => return Err(e.into()),
    };

    reply(&bot, &msg, text).await
}

/// Handle the admin-only commands
pub async fn admin_command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: Arc<Store>,
    l10n: Arc<LocalizationManager>,
) -> HandlerResult {
    if !is_admin(&bot, &msg).await? {
        warn!(
            chat_id = %msg.chat.id,
            user_id = ?msg.from.as_ref().map(|u| u.id),
            "Non-admin tried an admin command: {:?}", cmd
        );
        return reply(&bot, &msg, l10n.t("admins-only")).await;
    }

    let text = match cmd {
        Command::SetInvite(link) => {
            let link = link.trim();
            if link.is_empty() {
                l10n.t("invite-usage")
            } else {
                store.set_invite_link(link).await?;
                info!(chat_id = %msg.chat.id, "Invite link updated");
                l10n.t("invite-saved")
            }
        }
        Command::BanPack(arg) => match resolve_set_name(&arg, &msg) {
            Some(set_name) => {
                let set_name = set_name.to_lowercase();
                let key = if store.add_banned_pack(&set_name).await? {
                    "pack-banned"
                } else {
                    "pack-already-banned"
                };
                l10n.t_args(key, &[("set_name", html::escape(&set_name).as_str())])
            }
            None => l10n.t_args("pack-usage", &[("command", "banpack")]),
        },
        Command::UnbanPack(arg) => match resolve_set_name(&arg, &msg) {
            Some(set_name) => {
                let set_name = set_name.to_lowercase();
                let key = if store.unban_pack(&set_name).await? {
                    "pack-unbanned"
                } else {
                    "pack-not-banned"
                };
                l10n.t_args(key, &[("set_name", html::escape(&set_name).as_str())])
            }
            None => l10n.t_args("pack-usage", &[("command", "unbanpack")]),
        },
        Command::BannedPacks => format_banned_packs(&store.get_banned_packs().await?, &l10n),
        other => {
            warn!("Command routed to the admin handler by mistake: {:?}", other);
            return Ok(());
        }
    };

    reply(&bot, &msg, text).await
}
