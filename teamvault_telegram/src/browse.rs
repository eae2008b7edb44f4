//! Paginated browsing over query results.
//!
//! A multi-page result message gets two inline navigation buttons and an
//! ephemeral session bound to that one message and its issuing user.
//! Sessions close by timeout only; closing removes the buttons and leaves
//! the last rendered page in place.

use std::time::Duration;

use teamvault_core::{PAGE_SIZE, RosterSource, TeamRecord, page_count, page_slice};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId,
};
use tokio::time::Instant;
use tracing::warn;

use crate::{Error, Result, TeamBot};

/// Key of a browse session: the chat and message it is bound to.
pub type SessionKey = (i64, i32);

/// Direction of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Backward,
    Forward,
}

impl Nav {
    /// Parse a callback payload. Anything unknown is ignored input.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "nav:prev" => Some(Self::Backward),
            "nav:next" => Some(Self::Forward),
            _ => None,
        }
    }
}

/// Ephemeral navigation state for one rendered result message.
pub struct BrowseSession {
    pub records: Vec<TeamRecord>,
    pub page: usize,
    /// User who issued the query; input from anyone else is ignored.
    pub owner: u64,
    /// Instant after which input is no longer accepted.
    pub deadline: Instant,
    timeout: Duration,
}

impl BrowseSession {
    #[must_use]
    pub fn new(records: Vec<TeamRecord>, owner: u64, timeout: Duration) -> Self {
        Self {
            records,
            page: 0,
            owner,
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    #[must_use]
    pub fn pages(&self) -> usize {
        page_count(self.records.len())
    }

    /// Apply one navigation input.
    ///
    /// Returns the new page index, or `None` when the input changes
    /// nothing: wrong owner, expired window, or a page boundary. Accepted
    /// input slides the deadline forward by the session timeout.
    pub fn advance(&mut self, user: u64, nav: Nav, now: Instant) -> Option<usize> {
        if user != self.owner || now >= self.deadline {
            return None;
        }
        match nav {
            Nav::Forward if self.page + 1 < self.pages() => self.page += 1,
            Nav::Backward if self.page > 0 => self.page -= 1,
            Nav::Forward | Nav::Backward => return None,
        }
        self.deadline = now + self.timeout;
        Some(self.page)
    }
}

/// Render one page of results.
///
/// Rosters come from the cache-fronted resolver; any sentinel slot
/// collapses the roster line to an "unavailable" marker.
pub async fn render_page(
    records: &[TeamRecord],
    page: usize,
    rosters: &dyn RosterSource,
) -> anyhow::Result<String> {
    let pages = page_count(records.len()).max(1);
    let mut out = format!("Teams found (page {}/{pages})\n", page + 1);

    for (offset, record) in page_slice(records, page).iter().enumerate() {
        let ordinal = page * PAGE_SIZE + offset + 1;
        let style = record.style.as_deref().unwrap_or("(no style)");
        out.push_str(&format!("\n{ordinal}. {style}\n"));

        let roster = rosters.team_roster(&record.url).await?;
        if roster.is_complete() {
            out.push_str(&format!("   {}\n", roster.names().join(", ")));
        } else {
            out.push_str("   (roster unavailable)\n");
        }
        out.push_str(&format!("   {}\n", record.url));
    }

    Ok(out)
}

#[must_use]
pub fn nav_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("⬅️", "nav:prev"),
        InlineKeyboardButton::callback("➡️", "nav:next"),
    ]])
}

/// Send the first page and, for multi-page results, open a navigable
/// session bound to the sent message. Single-page results get no buttons
/// and no session.
pub async fn start(
    bot: &TeamBot,
    chat: ChatId,
    owner: u64,
    records: Vec<TeamRecord>,
) -> Result<()> {
    let text = render_page(&records, 0, bot.rosters.as_ref())
        .await
        .map_err(Error::Library)?;

    if page_count(records.len()) <= 1 {
        bot.bot.send_message(chat, text).await?;
        return Ok(());
    }

    let message = bot
        .bot
        .send_message(chat, text)
        .reply_markup(nav_keyboard())
        .await?;

    let key: SessionKey = (chat.0, message.id.0);
    let session = BrowseSession::new(records, owner, bot.nav_timeout());
    bot.sessions.lock().await.insert(key, session);

    tokio::spawn(expire_watch(bot.clone(), chat, message.id));
    Ok(())
}

/// Sleeps until the session's (possibly slid) deadline passes, then drops
/// the session and removes the navigation buttons. Cancellation is
/// advisory: nothing in flight is aborted, the session just stops
/// accepting input.
async fn expire_watch(bot: TeamBot, chat: ChatId, message_id: MessageId) {
    let key: SessionKey = (chat.0, message_id.0);
    loop {
        let deadline = bot.sessions.lock().await.get(&key).map(|s| s.deadline);
        let Some(deadline) = deadline else { return };
        if Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep_until(deadline).await;
    }

    bot.sessions.lock().await.remove(&key);
    if let Err(e) = bot.bot.edit_message_reply_markup(chat, message_id).await {
        warn!("Failed to clear navigation on expired session: {e}");
    }
}

/// Handle a navigation callback for whichever session it belongs to.
pub async fn handle_nav(bot: &TeamBot, q: CallbackQuery) -> Result<()> {
    // Always acknowledge so the client stops its progress spinner.
    bot.bot.answer_callback_query(q.id.clone()).await?;

    let Some(nav) = q.data.as_deref().and_then(Nav::parse) else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref().and_then(|m| m.regular_message()) else {
        return Ok(());
    };
    let key: SessionKey = (message.chat.id.0, message.id.0);

    let advanced = {
        let mut sessions = bot.sessions.lock().await;
        let Some(session) = sessions.get_mut(&key) else {
            return Ok(());
        };
        session
            .advance(q.from.id.0, nav, Instant::now())
            .map(|page| (page, session.records.clone()))
    };
    let Some((page, records)) = advanced else {
        return Ok(());
    };

    // Resolve and render outside the sessions lock; the rosters are
    // already cached in the common case.
    let text = render_page(&records, page, bot.rosters.as_ref())
        .await
        .map_err(Error::Library)?;
    bot.bot
        .edit_message_text(ChatId(key.0), MessageId(key.1), text)
        .reply_markup(nav_keyboard())
        .await?;
    Ok(())
}
