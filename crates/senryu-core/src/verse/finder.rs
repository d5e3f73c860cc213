use super::{
    form::{Pattern, VerseForm},
    morpheme::Morpheme,
    phrase::{take_phrase, Phrase},
};

/// A full match of a pattern, one phrase per slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verse<'a> {
    start: usize,
    phrases: Vec<Phrase<'a>>,
}

impl<'a> Verse<'a> {
    /// Index of the first token of the verse in the input sequence.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn phrases(&self) -> &[Phrase<'a>] {
        &self.phrases
    }

    /// Number of tokens the verse spans.
    pub fn len(&self) -> usize {
        self.phrases.iter().map(Phrase::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Try to read a whole verse off the head of `morphemes`.
fn verse_at(morphemes: &[Morpheme], start: usize, pattern: Pattern) -> Option<Verse<'_>> {
    let mut phrases = Vec::with_capacity(pattern.slots().len());
    let mut cursor = start;
    for slot in pattern.slots() {
        if cursor >= morphemes.len() {
            return None;
        }
        let phrase = take_phrase(&morphemes[cursor..], slot.morae)?;
        cursor += phrase.len();
        phrases.push(phrase);
    }
    Some(Verse { start, phrases })
}

/// Every verse matching `pattern`, one per start offset that succeeds.
///
/// Offsets are tried independently, so matches may overlap.
pub fn find_all_verses(morphemes: &[Morpheme], pattern: Pattern) -> Vec<Verse<'_>> {
    if pattern.is_empty() {
        return Vec::new();
    }
    (0..morphemes.len())
        .filter_map(|start| verse_at(morphemes, start, pattern))
        .collect()
}

/// Whether each flagged line opens with a content word.
pub fn starts_with_content_words(verse: &Verse<'_>, pattern: Pattern) -> bool {
    pattern
        .slots()
        .iter()
        .zip(verse.phrases())
        .filter(|(slot, _)| slot.content_word_start)
        .all(|(_, phrase)| {
            phrase
                .first()
                .is_some_and(|m| m.part_of_speech().is_content_word())
        })
}

/// Verses of `pattern` that also pass the content-word gate.
pub fn find_verses(morphemes: &[Morpheme], pattern: Pattern) -> Vec<Verse<'_>> {
    find_all_verses(morphemes, pattern)
        .into_iter()
        .filter(|v| starts_with_content_words(v, pattern))
        .collect()
}

pub fn find_form(morphemes: &[Morpheme], form: VerseForm) -> Vec<Verse<'_>> {
    find_verses(morphemes, form.pattern())
}

/// 5-7-5 verses.
pub fn find_senryu(morphemes: &[Morpheme]) -> Vec<Verse<'_>> {
    find_form(morphemes, VerseForm::Senryu)
}

/// 5-7-5-7-7 verses.
pub fn find_tanka(morphemes: &[Morpheme]) -> Vec<Verse<'_>> {
    find_form(morphemes, VerseForm::Tanka)
}

/// 7-7-7-5 verses.
pub fn find_dodoitsu(morphemes: &[Morpheme]) -> Vec<Verse<'_>> {
    find_form(morphemes, VerseForm::Dodoitsu)
}
