use std::sync::Arc;

use teloxide::prelude::*;

use senryu_core::domain::ChatId;

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(
    msg: &Message,
    text: &str,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    if msg.from().is_some_and(|u| u.is_bot) {
        return Ok(());
    }

    let (cmd, _args) = parse_command(text);
    match cmd.as_str() {
        "help" | "start" => {
            if let Err(e) = state.verse_bot.send_help(ChatId(msg.chat.id.0)).await {
                tracing::error!(chat_id = msg.chat.id.0, "failed to send help: {e}");
            }
        }
        other => {
            tracing::debug!(command = other, "ignoring unknown command");
        }
    }
    Ok(())
}
