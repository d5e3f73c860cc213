use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::{
    verse::{build_message, Morpheme},
    Result,
};

/// Port for morphological analysis (MeCab today).
#[async_trait]
pub trait Tokenizer: Send + Sync {
    async fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>>;
}

fn blank_re() -> &'static Regex {
    static BLANK: OnceLock<Regex> = OnceLock::new();
    // `\s` is Unicode-aware and covers the ideographic space U+3000.
    BLANK.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Drop every whitespace character so line breaks and spacing in a chat
/// message do not split words for the tokenizer.
pub fn normalize_text(text: &str) -> String {
    blank_re().replace_all(text, "").into_owned()
}

/// Normalize, tokenize and render every verse found in `text`.
///
/// Returns an empty string when nothing matched.
pub async fn detect_verses(tokenizer: &dyn Tokenizer, text: &str) -> Result<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Ok(String::new());
    }
    let morphemes = tokenizer.tokenize(&normalized).await?;
    Ok(build_message(&morphemes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, verse::PartOfSpeech};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTokenizer {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Tokenizer for FakeTokenizer {
        async fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(Error::Tokenizer("boom".to_string()));
            }
            Ok(vec![
                Morpheme::new("古池", PartOfSpeech::Noun, "フルイケ"),
                Morpheme::new("や", PartOfSpeech::Particle, "ヤ"),
                Morpheme::new("蛙", PartOfSpeech::Noun, "カワズ"),
                Morpheme::new("飛び込む", PartOfSpeech::Verb, "トビコム"),
                Morpheme::new("水", PartOfSpeech::Noun, "ミズ"),
                Morpheme::new("の", PartOfSpeech::Particle, "ノ"),
                Morpheme::new("音", PartOfSpeech::Noun, "オト"),
            ])
        }
    }

    #[test]
    fn strips_ascii_and_ideographic_spaces() {
        assert_eq!(normalize_text(" 古池や\u{3000}蛙\n飛び込む\t水の音 "), "古池や蛙飛び込む水の音");
        assert_eq!(normalize_text("   "), "");
    }

    #[tokio::test]
    async fn detects_through_port() {
        let tok = FakeTokenizer::default();
        let msg = detect_verses(&tok, "古池や　蛙飛び込む　水の音").await.unwrap();
        assert_eq!(msg, "Found 575 👮\n古池や ／ 蛙飛び込む ／ 水の音");
        assert_eq!(
            tok.seen.lock().unwrap().as_slice(),
            ["古池や蛙飛び込む水の音".to_string()]
        );
    }

    #[tokio::test]
    async fn blank_text_skips_tokenizer() {
        let tok = FakeTokenizer::default();
        assert_eq!(detect_verses(&tok, " \u{3000}\n").await.unwrap(), "");
        assert!(tok.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn tokenizer_errors_propagate() {
        let tok = FakeTokenizer {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            detect_verses(&tok, "古池や").await,
            Err(Error::Tokenizer(_))
        ));
    }
}
