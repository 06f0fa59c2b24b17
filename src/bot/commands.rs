//! Command definitions for the managed group

use teloxide::utils::command::BotCommands;

/// Commands accepted in the managed group.
///
/// Names are matched case-sensitively after lowercase renaming, so `/rules`
/// and `/regeln` match while `/Rules` does not.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show this text.")]
    Help,
    #[command(description = "show the group rules.")]
    Rules,
    #[command(description = "show the group rules (German).")]
    Regeln,
    #[command(description = "show the current invite link.")]
    Invite,
    #[command(description = "save a new invite link (admins).")]
    SetInvite(String),
    #[command(description = "ban a sticker pack by name or by replying to a sticker (admins).")]
    BanPack(String),
    #[command(description = "lift the ban on a sticker pack (admins).")]
    UnbanPack(String),
    #[command(description = "list the banned sticker packs (admins).")]
    BannedPacks,
}

impl Command {
    /// Both aliases of the rules command
    pub fn is_rules(&self) -> bool {
        matches!(self, Command::Rules | Command::Regeln)
    }

    /// Commands that only group admins may run
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::SetInvite(_)
                | Command::BanPack(_)
                | Command::UnbanPack(_)
                | Command::BannedPacks
        )
    }
}
