use teloxide::types::BotCommand;

/// Inbound commands, parsed from raw message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddTeam {
        generation: String,
        style: Option<String>,
        url: String,
    },
    SetStyle {
        url: String,
        style: String,
    },
    DeleteTeam {
        url: String,
    },
    DeleteBanned {
        generation: String,
        member: String,
    },
    Teams {
        generation: String,
        filter: Vec<String>,
    },
    Refresh {
        url: String,
    },
    Help,
}

/// A recognized command line whose arguments did not parse. The usage
/// line is replied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub usage: &'static str,
}

const USAGE_ADDTEAM: &str = "Usage: /addteam <generation> [style] <url>";
const USAGE_SETSTYLE: &str = "Usage: /setstyle <url> <style>";
const USAGE_DELTEAM: &str = "Usage: /delteam <url>";
const USAGE_DELBANNED: &str = "Usage: /delbanned <generation> <species>";
const USAGE_TEAMS: &str = "Usage: /teams <generation> [style or species]";
const USAGE_REFRESH: &str = "Usage: /refresh <url>";

impl Command {
    fn all() -> Vec<BotCommand> {
        vec![
            BotCommand {
                command: "addteam".to_string(),
                description: "Add a team: <generation> [style] <url>".to_string(),
            },
            BotCommand {
                command: "setstyle".to_string(),
                description: "Label a team: <url> <style>".to_string(),
            },
            BotCommand {
                command: "delteam".to_string(),
                description: "Delete a team by url".to_string(),
            },
            BotCommand {
                command: "delbanned".to_string(),
                description: "Delete teams containing a species".to_string(),
            },
            BotCommand {
                command: "teams".to_string(),
                description: "Find teams: <generation> [style or species]".to_string(),
            },
            BotCommand {
                command: "refresh".to_string(),
                description: "Re-resolve a team's roster".to_string(),
            },
            BotCommand {
                command: "help".to_string(),
                description: "Show the command list".to_string(),
            },
        ]
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::all()
    }

    /// Parse a message. `None` means the text is not a command at all;
    /// `Some(Err(_))` means a recognized command with bad arguments.
    ///
    /// Only the command word is case-folded; arguments (URLs in
    /// particular) keep their casing. A `/cmd@botname` suffix is accepted.
    #[must_use]
    pub fn parse(text: &str) -> Option<std::result::Result<Self, ParseError>> {
        let mut parts = text.trim().split_whitespace();
        let head = parts.next()?;
        if !head.starts_with('/') {
            return None;
        }
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        let args: Vec<&str> = parts.collect();

        let parsed = match name.as_str() {
            "/addteam" => Self::parse_add_team(&args),
            "/setstyle" => Self::parse_set_style(&args),
            "/delteam" => Self::parse_single_url(&args, USAGE_DELTEAM).map(|url| Self::DeleteTeam { url }),
            "/delbanned" => Self::parse_delete_banned(&args),
            "/teams" => Self::parse_teams(&args),
            "/refresh" => Self::parse_single_url(&args, USAGE_REFRESH).map(|url| Self::Refresh { url }),
            "/help" | "/start" => Ok(Self::Help),
            _ => return None,
        };
        Some(parsed)
    }

    fn parse_add_team(args: &[&str]) -> std::result::Result<Self, ParseError> {
        let [generation, middle @ .., url] = args else {
            return Err(ParseError {
                usage: USAGE_ADDTEAM,
            });
        };
        let style = if middle.is_empty() {
            None
        } else {
            Some(middle.join(" "))
        };
        Ok(Self::AddTeam {
            generation: (*generation).to_string(),
            style,
            url: (*url).to_string(),
        })
    }

    fn parse_set_style(args: &[&str]) -> std::result::Result<Self, ParseError> {
        let [url, style @ ..] = args else {
            return Err(ParseError {
                usage: USAGE_SETSTYLE,
            });
        };
        if style.is_empty() {
            return Err(ParseError {
                usage: USAGE_SETSTYLE,
            });
        }
        Ok(Self::SetStyle {
            url: (*url).to_string(),
            style: style.join(" "),
        })
    }

    fn parse_delete_banned(args: &[&str]) -> std::result::Result<Self, ParseError> {
        let [generation, member @ ..] = args else {
            return Err(ParseError {
                usage: USAGE_DELBANNED,
            });
        };
        if member.is_empty() {
            return Err(ParseError {
                usage: USAGE_DELBANNED,
            });
        }
        Ok(Self::DeleteBanned {
            generation: (*generation).to_string(),
            member: member.join(" "),
        })
    }

    fn parse_teams(args: &[&str]) -> std::result::Result<Self, ParseError> {
        let [generation, filter @ ..] = args else {
            return Err(ParseError { usage: USAGE_TEAMS });
        };
        Ok(Self::Teams {
            generation: (*generation).to_string(),
            filter: filter.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    fn parse_single_url(
        args: &[&str],
        usage: &'static str,
    ) -> std::result::Result<String, ParseError> {
        match args {
            [url] => Ok((*url).to_string()),
            _ => Err(ParseError { usage }),
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"TeamVault — shared team library

Commands:
/addteam <generation> [style] <url> - add a team (paste link)
/setstyle <url> <style>             - label a team
/delteam <url>                      - delete a team (admins)
/delbanned <generation> <species>   - drop teams using a species (admins)
/teams <generation> [filter]        - browse teams, filter by style or species
/refresh <url>                      - re-resolve a team's roster (admins)
/help                               - this list
"
    }
}
