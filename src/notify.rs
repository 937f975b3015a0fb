//! Outbound alerts.

use crate::models::TxKind;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::utils::html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Delivers a pre-formatted HTML message to the broadcast destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Sends to one fixed chat or channel.
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: Recipient) -> Self {
        Self { bot, chat }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(self.chat.clone(), text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

pub fn tx_url(explorer_url: &str, hash: &str) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), hash)
}

/// Format an alert for one classified transaction.
pub fn format_alert(kind: TxKind, name: &str, tx_link: &str) -> String {
    format!(
        "📢 {} from {}:\n<a href=\"{}\">🔗 View Tx</a>",
        kind.label(),
        html::escape(name),
        html::escape(tx_link)
    )
}
