use super::{
    finder::{find_form, Verse},
    form::VerseForm,
    morpheme::Morpheme,
};

pub const PHRASE_SEPARATOR: &str = " ／ ";

/// `古池や ／ 蛙飛び込む ／ 水の音`
pub fn render_verse(verse: &Verse<'_>) -> String {
    verse
        .phrases()
        .iter()
        .map(|p| p.text())
        .collect::<Vec<_>>()
        .join(PHRASE_SEPARATOR)
}

/// Rendered verses of one form, in start-offset order.
pub fn render_form(morphemes: &[Morpheme], form: VerseForm) -> Vec<String> {
    find_form(morphemes, form).iter().map(render_verse).collect()
}

/// Build the reply for a tokenized message.
///
/// One labeled block per form that matched, blocks separated by a blank line.
/// An empty string means there is nothing to post.
pub fn build_message(morphemes: &[Morpheme]) -> String {
    VerseForm::ALL
        .iter()
        .filter_map(|&form| {
            let verses = render_form(morphemes, form);
            if verses.is_empty() {
                return None;
            }
            Some(format!("{}\n{}", form.label(), verses.join("\n")))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
