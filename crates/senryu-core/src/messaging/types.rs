use crate::domain::{ChatId, UserId};

/// Cross-messenger incoming text, already stripped of transport details.
#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub from_bot: bool,
    pub text: String,
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

/// Split `text` into chunks of at most `max_chars` characters, preferring
/// line boundaries so rendered verses stay whole.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let sep = usize::from(!current.is_empty());
        if current_len + sep + line_len <= max_chars {
            if sep == 1 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += sep + line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        // A single line longer than the limit is cut on char boundaries.
        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            let s: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(s);
            } else {
                current_len = piece.len();
                current = s;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
