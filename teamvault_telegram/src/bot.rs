use crate::{Command, Result, browse};
use std::{collections::HashMap, sync::Arc, time::Duration};
use teamvault_config::Config;
use teamvault_core::Library;
use teamvault_roster::RosterService;
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram front end for the team library.
///
/// Holds the shared library handle plus the per-message browse sessions.
/// Everything is cheap to clone into dispatcher endpoints.
#[derive(Clone)]
pub struct TeamBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Shared team library
    pub(crate) library: Arc<Library>,
    /// Cache-fronted roster resolution (also serves /refresh)
    pub(crate) rosters: Arc<RosterService>,
    /// Configuration
    pub(crate) config: Config,
    /// Browse sessions keyed by (chat id, message id)
    pub(crate) sessions:
        Arc<tokio::sync::Mutex<HashMap<browse::SessionKey, browse::BrowseSession>>>,
}

impl TeamBot {
    pub fn new(
        token: String,
        library: Arc<Library>,
        rosters: Arc<RosterService>,
        config: Config,
    ) -> Result<Self> {
        let bot = Bot::new(token);

        Ok(Self {
            bot,
            library,
            rosters,
            config,
            sessions: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
        })
    }

    /// Check if a user may run administrator commands.
    #[must_use]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.config.telegram.admins.contains(&user_id)
    }

    /// Inactivity window after which a browse session closes.
    #[must_use]
    pub(crate) const fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.config.library.nav_timeout_secs)
    }

    /// Test connection to Telegram API with exponential backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        bot_user
                            .user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        bot_user.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);
                    let delay = Duration::from_secs(delay_secs);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Telegram API being temporarily unavailable");
                    }

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.test_connection().await?;

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!("Failed to publish command list: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry()
            .branch(Update::filter_message().endpoint({
                let bot_clone = self.clone();
                move |_bot: Bot, msg: teloxide::types::Message| {
                    let bot_clone = bot_clone.clone();
                    async move { crate::handler::handle_message(bot_clone, msg).await }
                }
            }))
            .branch(Update::filter_callback_query().endpoint({
                let bot_clone = self.clone();
                move |_bot: Bot, q: teloxide::types::CallbackQuery| {
                    let bot_clone = bot_clone.clone();
                    async move { crate::handler::handle_callback(bot_clone, q).await }
                }
            }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
