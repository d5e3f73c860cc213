use std::sync::Arc;

use teloxide::prelude::*;

use senryu_core::{bot::Outcome, messaging::types::TextMessage};

use crate::router::AppState;

pub async fn handle_text(msg: TextMessage, state: Arc<AppState>) -> ResponseResult<()> {
    // Failures stay in the log; the chat never hears about them.
    match state.verse_bot.handle_text(&msg).await {
        Ok(Outcome::Posted(n)) => {
            tracing::debug!(chat_id = msg.chat_id.0, messages = n, "verse reply sent");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(chat_id = msg.chat_id.0, "verse detection failed: {e}");
        }
    }
    Ok(())
}
