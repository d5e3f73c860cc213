//! MeCab adapter for the tokenizer port.
//!
//! Runs `mecab` once per message with the text on stdin and parses the
//! default IPADIC output format (`surface\tfeature`, terminated by `EOS`).

use std::{path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;

use senryu_core::{errors::Error, tokenizer::Tokenizer, verse::Morpheme, Result};

use tokio::{io::AsyncWriteExt, process::Command};

const STDERR_PREVIEW_MAX_CHARS: usize = 500;

#[derive(Clone, Debug)]
pub struct MecabConfig {
    pub mecab_path: PathBuf,
    /// Dictionary directory passed as `-d`; MeCab's default when `None`.
    pub dicdir: Option<PathBuf>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct MecabTokenizer {
    cfg: MecabConfig,
}

impl MecabTokenizer {
    pub fn new(cfg: MecabConfig) -> Self {
        Self { cfg }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.cfg.mecab_path);
        if let Some(dir) = &self.cfg.dicdir {
            cmd.arg("-d").arg(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, text: &str) -> Result<String> {
        let mut child = self.command().spawn().map_err(|e| {
            Error::Tokenizer(format!(
                "failed to spawn {}: {e}",
                self.cfg.mecab_path.display()
            ))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Tokenizer("mecab stdin was not captured".to_string()))?;
        // Writing counts against the deadline too: a child that never drains
        // stdin blocks the write once the pipe buffer fills.
        let exchange = async move {
            // MeCab analyses line by line; the caller already removed newlines.
            stdin.write_all(text.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            drop(stdin);
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.cfg.timeout, exchange)
            .await
            .map_err(|_| {
                Error::Tokenizer(format!("mecab timed out after {:?}", self.cfg.timeout))
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = truncate_text(stderr.trim(), STDERR_PREVIEW_MAX_CHARS);
            if stderr.is_empty() {
                return Err(Error::Tokenizer(format!(
                    "mecab exited with status {}",
                    output.status
                )));
            }
            return Err(Error::Tokenizer(format!(
                "mecab exited with status {}\nstderr:\n{stderr}",
                output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Tokenizer(format!("mecab output is not UTF-8: {e}")))
    }
}

#[async_trait]
impl Tokenizer for MecabTokenizer {
    async fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let out = self.run(text).await?;
        let morphemes = parse_output(&out);
        tracing::debug!(tokens = morphemes.len(), "mecab tokenized message");
        Ok(morphemes)
    }
}

/// Parse MeCab's default output into morphemes.
///
/// Stops at the first `EOS`; lines without a tab separator are ignored.
pub fn parse_output(out: &str) -> Vec<Morpheme> {
    out.lines()
        .take_while(|line| *line != "EOS")
        .filter_map(|line| line.split_once('\t'))
        .filter(|(surface, _)| !surface.is_empty())
        .map(|(surface, feature)| Morpheme::from_ipadic_feature(surface, feature))
        .collect()
}

fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out = s.chars().take(max_len).collect::<String>();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use senryu_core::verse::{build_message, PartOfSpeech, UNKNOWN_READING};

    const FURUIKE: &str = "古池\t名詞,一般,*,*,*,*,古池,フルイケ,フルイケ
や\t助詞,間投助詞,*,*,*,*,や,ヤ,ヤ
蛙\t名詞,一般,*,*,*,*,蛙,カエル,カエル
飛び込む\t動詞,自立,*,*,五段・マ行,基本形,飛び込む,トビコム,トビコム
水\t名詞,一般,*,*,*,*,水,ミズ,ミズ
の\t助詞,連体化,*,*,*,*,の,ノ,ノ
音\t名詞,一般,*,*,*,*,音,オト,オト
EOS
";

    #[test]
    fn parses_ipadic_lines() {
        let ms = parse_output(FURUIKE);
        assert_eq!(ms.len(), 7);
        assert_eq!(ms[0].surface(), "古池");
        assert_eq!(ms[3].part_of_speech(), &PartOfSpeech::Verb);
        assert_eq!(ms[5].reading(), "ノ");
    }

    #[test]
    fn parsed_output_feeds_the_detector() {
        assert_eq!(
            build_message(&parse_output(FURUIKE)),
            "Found 575 👮\n古池や ／ 蛙飛び込む ／ 水の音"
        );
    }

    #[test]
    fn unknown_words_and_junk_lines() {
        let out = "ほげ\t名詞,固有名詞,組織,*,*,*,*\nnot a token line\n!\t記号,一般,*,*,*,*,!,!,!\nEOS\nあと\t名詞,一般,*,*,*,*,あと,アト,アト\n";
        let ms = parse_output(out);
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].reading(), UNKNOWN_READING);
        assert!(ms[1].part_of_speech().is_symbol());
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_text("あいうえお", 3), "あいう...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[tokio::test]
    async fn missing_binary_is_a_tokenizer_error() {
        let tok = MecabTokenizer::new(MecabConfig {
            mecab_path: PathBuf::from("/nonexistent/mecab-binary"),
            dicdir: None,
            timeout: Duration::from_secs(1),
        });
        assert!(matches!(
            tok.tokenize("古池や").await,
            Err(Error::Tokenizer(_))
        ));
    }

    #[tokio::test]
    async fn empty_text_does_not_spawn() {
        let tok = MecabTokenizer::new(MecabConfig {
            mecab_path: PathBuf::from("/nonexistent/mecab-binary"),
            dicdir: None,
            timeout: Duration::from_secs(1),
        });
        assert!(tok.tokenize("").await.unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stuck_process_times_out_while_writing() {
        use std::os::unix::fs::PermissionsExt;

        // Never reads stdin, so a large write fills the pipe and blocks.
        let script =
            std::env::temp_dir().join(format!("senryu-stuck-mecab-{}", std::process::id()));
        std::fs::write(&script, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let tok = MecabTokenizer::new(MecabConfig {
            mecab_path: script.clone(),
            dicdir: None,
            timeout: Duration::from_millis(300),
        });
        let text = "ア".repeat(1 << 20);
        let started = std::time::Instant::now();
        let res = tok.tokenize(&text).await;
        let _ = std::fs::remove_file(&script);

        match res {
            Err(Error::Tokenizer(msg)) => assert!(msg.contains("timed out"), "{msg}"),
            other => panic!("expected a timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reads_output_from_a_mecab_compatible_process() {
        // `cat` echoes the pre-tokenized lines back, standing in for mecab.
        let tok = MecabTokenizer::new(MecabConfig {
            mecab_path: PathBuf::from("cat"),
            dicdir: None,
            timeout: Duration::from_secs(5),
        });
        let ms = tok
            .tokenize("水\t名詞,一般,*,*,*,*,水,ミズ,ミズ")
            .await
            .unwrap();
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].mora_len(), 2);
    }
}
