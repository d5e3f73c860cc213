use super::morpheme::Morpheme;

/// A run of whole morphemes that fills one line of a verse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phrase<'a> {
    morae: usize,
    morphemes: &'a [Morpheme],
}

impl<'a> Phrase<'a> {
    /// Mora count of the counted morphemes; always equals the line's target.
    pub fn morae(&self) -> usize {
        self.morae
    }

    pub fn morphemes(&self) -> &'a [Morpheme] {
        self.morphemes
    }

    /// Number of tokens consumed, including uncounted symbols.
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    pub fn first(&self) -> Option<&'a Morpheme> {
        self.morphemes.first()
    }

    /// Surfaces concatenated back into the original text.
    pub fn text(&self) -> String {
        self.morphemes.iter().map(Morpheme::surface).collect()
    }
}

/// Take one phrase of exactly `target` morae from the head of `morphemes`.
///
/// Single greedy pass, no backtracking: a token that would overshoot is never
/// split, so the attempt simply fails.
pub fn take_phrase(morphemes: &[Morpheme], target: usize) -> Option<Phrase<'_>> {
    if morphemes.is_empty() {
        return None;
    }

    let mut total = 0;
    let mut consumed = 0;
    for m in morphemes {
        if total >= target {
            break;
        }
        // Zero-mora tokens abort before the symbol check, so unreadable
        // punctuation blocks the phrase instead of being skipped.
        if m.mora_len() == 0 {
            return None;
        }
        if m.part_of_speech().is_symbol() {
            consumed += 1;
            continue;
        }
        if !m.is_pronounceable() {
            return None;
        }
        total += m.mora_len();
        consumed += 1;
    }

    if total != target {
        return None;
    }
    Some(Phrase {
        morae: total,
        morphemes: &morphemes[..consumed],
    })
}
