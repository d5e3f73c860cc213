/// Reading used by the tokenizer when it cannot pronounce a token.
pub const UNKNOWN_READING: &str = "*";

/// Characters that never count as a mora of their own: the unknown marker and
/// the small kana that fuse with the preceding sound (キャ, シュ, チョ, ...).
const NON_MORA_CHARS: [char; 6] = ['*', 'ャ', 'ィ', 'ュ', 'ェ', 'ョ'];

/// Top-level part of speech, as tagged by an IPADIC-style dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Verb,
    Adjective,
    AdjectivalNoun,
    Noun,
    Adnominal,
    Adverb,
    Conjunction,
    Interjection,
    Particle,
    AuxiliaryVerb,
    Prefix,
    Filler,
    Symbol,
    Other(String),
}

impl PartOfSpeech {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "動詞" => Self::Verb,
            "形容詞" => Self::Adjective,
            "形容動詞" => Self::AdjectivalNoun,
            "名詞" => Self::Noun,
            "連体詞" => Self::Adnominal,
            "副詞" => Self::Adverb,
            "接続詞" => Self::Conjunction,
            "感動詞" => Self::Interjection,
            "助詞" => Self::Particle,
            "助動詞" => Self::AuxiliaryVerb,
            "接頭詞" => Self::Prefix,
            "フィラー" => Self::Filler,
            "記号" => Self::Symbol,
            other => Self::Other(other.to_string()),
        }
    }

    /// Words that carry meaning on their own and may open a verse line.
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            Self::Verb
                | Self::Adjective
                | Self::AdjectivalNoun
                | Self::Noun
                | Self::Adnominal
                | Self::Adverb
                | Self::Conjunction
                | Self::Interjection
        )
    }

    /// Punctuation and symbols ride along in a phrase without being counted.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol)
    }
}

/// One token produced by the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morpheme {
    surface: String,
    part_of_speech: PartOfSpeech,
    reading: String,
    mora_len: usize,
}

impl Morpheme {
    pub fn new(
        surface: impl Into<String>,
        part_of_speech: PartOfSpeech,
        reading: impl Into<String>,
    ) -> Self {
        let reading = reading.into();
        let mora_len = mora_len(&reading);
        Self {
            surface: surface.into(),
            part_of_speech,
            reading,
            mora_len,
        }
    }

    /// Build a morpheme from a MeCab IPADIC feature string:
    /// `品詞,細分類1,細分類2,細分類3,活用型,活用形,原形,読み,発音`.
    ///
    /// Unknown words come with only seven fields; they get the `*` reading.
    pub fn from_ipadic_feature(surface: &str, feature: &str) -> Self {
        let fields: Vec<&str> = feature.split(',').collect();
        let part_of_speech = PartOfSpeech::from_tag(fields.first().copied().unwrap_or(""));
        let reading = fields.get(8).copied().unwrap_or(UNKNOWN_READING);
        Self::new(surface, part_of_speech, reading)
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn part_of_speech(&self) -> &PartOfSpeech {
        &self.part_of_speech
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn mora_len(&self) -> usize {
        self.mora_len
    }

    /// True when every character of the reading is katakana (ァ..ン) or the
    /// prolonged sound mark.
    pub fn is_pronounceable(&self) -> bool {
        self.reading.chars().all(is_katakana)
    }
}

/// Count morae in a katakana reading.
///
/// Only small ャ ィ ュ ェ ョ are folded into the preceding mora; small ァ ゥ ォ
/// still count as one each, so some loanword readings come out a little long.
pub fn mora_len(reading: &str) -> usize {
    reading
        .chars()
        .filter(|c| !NON_MORA_CHARS.contains(c))
        .count()
}

fn is_katakana(c: char) -> bool {
    matches!(c, 'ァ'..='ン' | 'ー')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mora_len_folds_small_ya_yu_yo() {
        assert_eq!(mora_len("フルイケ"), 4);
        assert_eq!(mora_len("キョー"), 2);
        assert_eq!(mora_len("シャシン"), 3);
        assert_eq!(mora_len("ティー"), 2);
    }

    #[test]
    fn mora_len_keeps_small_a_u_o() {
        // ファ is one mora in speech but counted as two.
        assert_eq!(mora_len("ファン"), 3);
        assert_eq!(mora_len("ウォー"), 3);
    }

    #[test]
    fn unknown_reading_has_no_morae() {
        assert_eq!(mora_len(UNKNOWN_READING), 0);
        assert_eq!(mora_len(""), 0);
    }

    #[test]
    fn parses_known_ipadic_feature() {
        let m = Morpheme::from_ipadic_feature(
            "古池",
            "名詞,一般,*,*,*,*,古池,フルイケ,フルイケ",
        );
        assert_eq!(m.surface(), "古池");
        assert_eq!(m.part_of_speech(), &PartOfSpeech::Noun);
        assert_eq!(m.reading(), "フルイケ");
        assert_eq!(m.mora_len(), 4);
    }

    #[test]
    fn uses_pronunciation_field() {
        // 読み and 発音 differ for long vowels; the 発音 column wins.
        let m = Morpheme::from_ipadic_feature("今日", "名詞,副詞可能,*,*,*,*,今日,キョウ,キョー");
        assert_eq!(m.reading(), "キョー");
        assert_eq!(m.mora_len(), 2);
    }

    #[test]
    fn unknown_word_gets_sentinel_reading() {
        let m = Morpheme::from_ipadic_feature("ほげ", "名詞,固有名詞,組織,*,*,*,*");
        assert_eq!(m.reading(), UNKNOWN_READING);
        assert_eq!(m.mora_len(), 0);
    }

    #[test]
    fn classifies_parts_of_speech() {
        // (tag, variant, content word, symbol)
        let table = [
            ("動詞", PartOfSpeech::Verb, true, false),
            ("形容詞", PartOfSpeech::Adjective, true, false),
            ("形容動詞", PartOfSpeech::AdjectivalNoun, true, false),
            ("名詞", PartOfSpeech::Noun, true, false),
            ("連体詞", PartOfSpeech::Adnominal, true, false),
            ("副詞", PartOfSpeech::Adverb, true, false),
            ("接続詞", PartOfSpeech::Conjunction, true, false),
            ("感動詞", PartOfSpeech::Interjection, true, false),
            ("助詞", PartOfSpeech::Particle, false, false),
            ("助動詞", PartOfSpeech::AuxiliaryVerb, false, false),
            ("接頭詞", PartOfSpeech::Prefix, false, false),
            ("フィラー", PartOfSpeech::Filler, false, false),
            ("記号", PartOfSpeech::Symbol, false, true),
            ("その他", PartOfSpeech::Other("その他".to_string()), false, false),
            ("", PartOfSpeech::Other(String::new()), false, false),
        ];
        for (tag, expected, content, symbol) in table {
            let pos = PartOfSpeech::from_tag(tag);
            assert_eq!(pos, expected, "tag {tag:?}");
            assert_eq!(pos.is_content_word(), content, "tag {tag:?}");
            assert_eq!(pos.is_symbol(), symbol, "tag {tag:?}");
        }
        assert_eq!(
            PartOfSpeech::from_tag("補助記号"),
            PartOfSpeech::Other("補助記号".to_string())
        );
    }

    #[test]
    fn pronounceable_readings() {
        let kana = Morpheme::new("ラーメン", PartOfSpeech::Noun, "ラーメン");
        assert!(kana.is_pronounceable());

        let ascii = Morpheme::new("abc", PartOfSpeech::Noun, "abc");
        assert!(!ascii.is_pronounceable());

        let mixed = Morpheme::new("ヴァ", PartOfSpeech::Noun, "ヴァ");
        assert!(!mixed.is_pronounceable());
    }
}
