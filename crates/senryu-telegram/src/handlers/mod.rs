//! Telegram update handlers.
//!
//! Each handler converts a teloxide message into the core's messenger-agnostic
//! shape and hands it to `VerseBot`.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use senryu_core::{
    domain::{ChatId, UserId},
    messaging::types::TextMessage,
};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Captions on photos/documents are scanned like plain text.
    let Some(body) = msg.text().or_else(|| msg.caption()) else {
        return Ok(());
    };

    if msg.text().is_some() && body.starts_with('/') {
        return commands::handle_command(&msg, body, state).await;
    }

    text::handle_text(to_text_message(&msg, body), state).await
}

fn to_text_message(msg: &Message, body: &str) -> TextMessage {
    let user = msg.from();
    TextMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: user.map(|u| UserId(u.id.0 as i64)),
        from_bot: user.map(|u| u.is_bot).unwrap_or(false),
        text: body.to_string(),
    }
}
