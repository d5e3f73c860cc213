use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use senryu_core::messaging::throttled::{ThrottleConfig, ThrottledMessenger};
use senryu_core::{
    bot::VerseBot, config::Config, messaging::port::MessagingPort, tokenizer::Tokenizer,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub verse_bot: Arc<VerseBot>,
}

pub async fn run_polling(cfg: Arc<Config>, tokenizer: Arc<dyn Tokenizer>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "senryu bot started"),
        Err(e) => tracing::warn!("could not fetch bot identity: {e}"),
    }
    if cfg.allowed_chats.is_empty() {
        tracing::info!("serving all chats");
    } else {
        tracing::info!(chats = cfg.allowed_chats.len(), "serving allowed chats only");
    }

    // Wrap the raw Telegram messenger with a throttling decorator; the adapter
    // still retries once on RetryAfter.
    let raw_messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let messenger: Arc<dyn MessagingPort> = Arc::new(ThrottledMessenger::new(
        raw_messenger,
        ThrottleConfig::default(),
    ));

    let state = Arc::new(AppState {
        verse_bot: Arc::new(VerseBot::new(cfg, tokenizer, messenger)),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
