//! Messenger-agnostic reply logic: decide whether a message qualifies, run
//! the detector over it and post whatever it found.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config::Config,
    domain::ChatId,
    messaging::{
        port::MessagingPort,
        types::{split_message, TextMessage},
    },
    security::{is_chat_allowed, RateLimiter},
    tokenizer::{detect_verses, Tokenizer},
    Result,
};

pub const HELP_TEXT: &str = "575，57577，7775 に反応します(｀･ω･´)";

/// Why a message was dropped before detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    FromBot,
    ChatNotAllowed,
    TooLong,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    NothingFound,
    RateLimited(Option<Duration>),
    /// Number of messages posted (long replies are split).
    Posted(usize),
}

pub struct VerseBot {
    cfg: Arc<Config>,
    tokenizer: Arc<dyn Tokenizer>,
    messenger: Arc<dyn MessagingPort>,
    rate_limiter: Mutex<RateLimiter>,
}

impl VerseBot {
    pub fn new(
        cfg: Arc<Config>,
        tokenizer: Arc<dyn Tokenizer>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        let rate_limiter = RateLimiter::new(
            cfg.rate_limit_enabled,
            cfg.rate_limit_requests,
            cfg.rate_limit_window,
        );
        Self {
            cfg,
            tokenizer,
            messenger,
            rate_limiter: Mutex::new(rate_limiter),
        }
    }

    fn skip_reason(&self, msg: &TextMessage) -> Option<SkipReason> {
        if msg.from_bot {
            return Some(SkipReason::FromBot);
        }
        if !is_chat_allowed(msg.chat_id, &self.cfg.allowed_chats) {
            return Some(SkipReason::ChatNotAllowed);
        }
        if msg.text.chars().count() > self.cfg.max_input_chars {
            return Some(SkipReason::TooLong);
        }
        None
    }

    /// Scan one message and reply in its chat when verses are found.
    pub async fn handle_text(&self, msg: &TextMessage) -> Result<Outcome> {
        if let Some(reason) = self.skip_reason(msg) {
            tracing::debug!(chat_id = msg.chat_id.0, ?reason, "message skipped");
            return Ok(Outcome::Skipped(reason));
        }

        let reply = detect_verses(self.tokenizer.as_ref(), &msg.text).await?;
        if reply.is_empty() {
            return Ok(Outcome::NothingFound);
        }

        let (allowed, retry_after) = self.rate_limiter.lock().await.check(msg.chat_id);
        if !allowed {
            tracing::warn!(
                chat_id = msg.chat_id.0,
                ?retry_after,
                "verse reply rate limited"
            );
            return Ok(Outcome::RateLimited(retry_after));
        }

        let posted = self.post(msg.chat_id, &reply).await?;
        tracing::info!(
            chat_id = msg.chat_id.0,
            user_id = msg.user_id.map(|u| u.0),
            reply = %reply.replace('\n', "\\n"),
            "posted verses"
        );
        Ok(Outcome::Posted(posted))
    }

    pub async fn send_help(&self, chat_id: ChatId) -> Result<()> {
        self.messenger.send_text(chat_id, HELP_TEXT).await?;
        Ok(())
    }

    async fn post(&self, chat_id: ChatId, text: &str) -> Result<usize> {
        let limit = self.messenger.capabilities().max_message_len;
        let chunks = split_message(text, limit);
        for chunk in &chunks {
            self.messenger.send_text(chat_id, chunk).await?;
        }
        Ok(chunks.len())
    }
}
