//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use crate::bot_config::BotConfig;
use crate::localization::LocalizationManager;

/// Reply payload of the rules command
#[derive(Debug, Clone, PartialEq)]
pub struct RulesReply {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

/// Build the rules reply once from configuration and localization
pub fn build_rules_reply(config: &BotConfig, l10n: &LocalizationManager) -> RulesReply {
    RulesReply {
        text: l10n.t("rules-text"),
        keyboard: create_rules_keyboard(config, l10n),
    }
}

/// Create the inline keyboard linking the rules online and in-chat
pub fn create_rules_keyboard(
    config: &BotConfig,
    l10n: &LocalizationManager,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url(l10n.t("rules-button-online"), config.rules_online_url.clone()),
        InlineKeyboardButton::url(l10n.t("rules-button-chat"), config.rules_chat_url.clone()),
    ]])
}

/// Format the banned sticker packs as a bullet list
pub fn format_banned_packs(packs: &[String], l10n: &LocalizationManager) -> String {
    if packs.is_empty() {
        return l10n.t("banned-packs-empty");
    }

    let mut result = l10n.t("banned-packs-header");
    for pack in packs {
        result.push_str(&format!("\n• <code>{}</code>", html::escape(pack)));
    }

    result
}
