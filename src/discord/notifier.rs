//! Direct-message delivery through the Discord HTTP API

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::UserId as DiscordUserId;
use std::sync::Arc;

use crate::core::{truncate_for_message, LunaError, Notifier, Result};
use crate::database::UserId;

pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()> {
        let id = u64::try_from(user_id)
            .map_err(|_| LunaError::Transport(format!("invalid user id {user_id}")))?;
        let dm = DiscordUserId(id)
            .create_dm_channel(&self.http)
            .await
            .map_err(|e| LunaError::Transport(format!("opening DM with {user_id}: {e}")))?;
        dm.send_message(&self.http, |m| m.content(truncate_for_message(text)))
            .await
            .map_err(|e| LunaError::Transport(format!("sending DM to {user_id}: {e}")))?;
        Ok(())
    }
}
