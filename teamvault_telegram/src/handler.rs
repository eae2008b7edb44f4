use crate::{Command, Error, Result, TeamBot, browse};
use teloxide::{
    requests::Requester,
    types::{CallbackQuery, Message},
};
use tracing::info;

/// Handle any message: parse it as a command and dispatch, or ignore it.
pub async fn handle_message(bot: TeamBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(parsed) = Command::parse(text) else {
        return Ok(());
    };

    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");
    info!("[@{username}] Command: {text}");

    match parsed {
        Ok(cmd) => handle_command(bot, msg, cmd).await,
        Err(e) => {
            bot.bot.send_message(msg.chat.id, e.usage).await?;
            Ok(())
        }
    }
}

/// Handle a parsed command.
pub async fn handle_command(bot: TeamBot, msg: Message, cmd: Command) -> Result<()> {
    let user_id = msg.from.as_ref().map(|u| u.id.0);
    let is_admin = user_id.is_some_and(|id| bot.is_admin(id));

    match cmd {
        Command::AddTeam {
            generation,
            style,
            url,
        } => {
            if !bot.config.telegram.open_submissions && !is_admin {
                bot.bot
                    .send_message(msg.chat.id, "Only administrators can add teams.")
                    .await?;
                return Ok(());
            }
            let prefix = &bot.config.library.paste_prefix;
            if !url.starts_with(prefix.as_str()) {
                bot.bot
                    .send_message(
                        msg.chat.id,
                        format!("Error: the team URL must start with {prefix}"),
                    )
                    .await?;
                return Ok(());
            }
            bot.library
                .add_team(generation.clone(), style, url.clone())
                .await
                .map_err(Error::Library)?;
            bot.bot
                .send_message(msg.chat.id, format!("Team added to {generation}: {url}"))
                .await?;
        }

        Command::SetStyle { url, style } => {
            let found = bot
                .library
                .update_style(&url, &style)
                .await
                .map_err(Error::Library)?;
            let reply = if found {
                format!("Style set to \"{style}\".")
            } else {
                "No team found with that URL.".to_string()
            };
            bot.bot.send_message(msg.chat.id, reply).await?;
        }

        Command::DeleteTeam { url } => {
            if !is_admin {
                bot.bot
                    .send_message(msg.chat.id, "Only administrators can delete teams.")
                    .await?;
                return Ok(());
            }
            let found = bot.library.delete_team(&url).await.map_err(Error::Library)?;
            let reply = if found {
                "Team deleted."
            } else {
                "No team found with that URL."
            };
            bot.bot.send_message(msg.chat.id, reply).await?;
        }

        Command::DeleteBanned { generation, member } => {
            if !is_admin {
                bot.bot
                    .send_message(msg.chat.id, "Only administrators can run /delbanned.")
                    .await?;
                return Ok(());
            }
            let removed = bot
                .library
                .delete_banned(&generation, &member)
                .await
                .map_err(Error::Library)?;
            bot.bot
                .send_message(
                    msg.chat.id,
                    format!("Removed {removed} team(s) from {generation} containing {member}."),
                )
                .await?;
        }

        Command::Refresh { url } => {
            if !is_admin {
                bot.bot
                    .send_message(msg.chat.id, "Only administrators can refresh rosters.")
                    .await?;
                return Ok(());
            }
            let roster = bot.rosters.refresh(&url).await.map_err(Error::Library)?;
            let reply = if roster.is_complete() {
                format!("Roster refreshed: {}", roster.names().join(", "))
            } else if roster.is_fetch_error() {
                "Could not reach the team page; the old entry was dropped and the next lookup will retry.".to_string()
            } else {
                format!(
                    "Roster refreshed, {} of 6 slots recognized: {}",
                    roster.names().len(),
                    roster.names().join(", ")
                )
            };
            bot.bot.send_message(msg.chat.id, reply).await?;
        }

        Command::Teams { generation, filter } => {
            let records = bot
                .library
                .query(&generation, &filter)
                .await
                .map_err(Error::Library)?;
            if records.is_empty() {
                bot.bot
                    .send_message(msg.chat.id, "No teams found for those filters.")
                    .await?;
                return Ok(());
            }
            let owner = user_id.unwrap_or_default();
            browse::start(&bot, msg.chat.id, owner, records).await?;
        }

        Command::Help => {
            bot.bot
                .send_message(msg.chat.id, Command::help_text())
                .await?;
        }
    }

    Ok(())
}

/// Handle an inline-keyboard callback (browse navigation).
pub async fn handle_callback(bot: TeamBot, q: CallbackQuery) -> Result<()> {
    browse::handle_nav(&bot, q).await
}
