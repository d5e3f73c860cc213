use std::sync::Arc;

use senryu_core::{config::Config, tokenizer::Tokenizer};
use senryu_mecab::{MecabConfig, MecabTokenizer};

#[tokio::main]
async fn main() -> Result<(), senryu_core::Error> {
    senryu_core::logging::init("senryu")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(mecab = %cfg.mecab_path.display(), "using mecab tokenizer");

    let tokenizer: Arc<dyn Tokenizer> = Arc::new(MecabTokenizer::new(MecabConfig {
        mecab_path: cfg.mecab_path.clone(),
        dicdir: cfg.mecab_dicdir.clone(),
        timeout: cfg.tokenizer_timeout,
    }));

    senryu_telegram::router::run_polling(cfg, tokenizer)
        .await
        .map_err(|e| senryu_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
