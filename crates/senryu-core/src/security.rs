use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::domain::ChatId;

// ============== Chat allow-list ==============

/// An empty allow-list serves every chat.
pub fn is_chat_allowed(chat_id: ChatId, allowed_chats: &[i64]) -> bool {
    allowed_chats.is_empty() || allowed_chats.contains(&chat_id.0)
}

// ============== Rate Limiter (Token Bucket) ==============

#[derive(Clone, Debug)]
struct Bucket {
    tokens: f64,
    last_update: Instant,
}

/// Caps how many verse replies a single chat can trigger per window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    enabled: bool,
    max_tokens: f64,
    refill_per_sec: f64,
    buckets: HashMap<ChatId, Bucket>,
}

impl RateLimiter {
    pub fn new(enabled: bool, max_tokens: u32, window: Duration) -> Self {
        let max_tokens_f = max_tokens as f64;
        let window_secs = window.as_secs_f64().max(1e-9);

        Self {
            enabled,
            max_tokens: max_tokens_f,
            refill_per_sec: max_tokens_f / window_secs,
            buckets: HashMap::new(),
        }
    }

    pub fn check(&mut self, chat_id: ChatId) -> (bool, Option<Duration>) {
        self.check_at(chat_id, Instant::now())
    }

    pub fn check_at(&mut self, chat_id: ChatId, now: Instant) -> (bool, Option<Duration>) {
        if !self.enabled {
            return (true, None);
        }

        // A zero budget never refills; refuse without a retry hint.
        if self.refill_per_sec <= 0.0 {
            return (false, None);
        }

        // Buckets that are full again carry no state worth keeping.
        let (max_tokens, refill_per_sec) = (self.max_tokens, self.refill_per_sec);
        self.buckets.retain(|id, b| {
            let elapsed = now.saturating_duration_since(b.last_update).as_secs_f64();
            *id == chat_id || b.tokens + elapsed * refill_per_sec < max_tokens
        });

        let bucket = self.buckets.entry(chat_id).or_insert_with(|| Bucket {
            tokens: self.max_tokens,
            last_update: now,
        });

        let elapsed = now.duration_since(bucket.last_update).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.max_tokens);
        bucket.last_update = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return (true, None);
        }

        let secs = (1.0 - bucket.tokens) / self.refill_per_sec;
        (false, Some(Duration::from_secs_f64(secs.max(0.0))))
    }
}
