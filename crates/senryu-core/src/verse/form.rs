/// One line of a verse pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub morae: usize,
    /// The line must open with a content word.
    pub content_word_start: bool,
}

const fn slot(morae: usize, content_word_start: bool) -> Slot {
    Slot {
        morae,
        content_word_start,
    }
}

/// Mora layout of a verse form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    slots: &'static [Slot],
}

impl Pattern {
    pub const fn new(slots: &'static [Slot]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

const SENRYU_SLOTS: [Slot; 3] = [slot(5, true), slot(7, false), slot(5, false)];

const TANKA_SLOTS: [Slot; 5] = [
    slot(5, true),
    slot(7, false),
    slot(5, false),
    slot(7, true),
    slot(7, false),
];

const DODOITSU_SLOTS: [Slot; 4] = [slot(7, true), slot(7, false), slot(7, false), slot(5, false)];

pub const SENRYU: Pattern = Pattern::new(&SENRYU_SLOTS);
pub const TANKA: Pattern = Pattern::new(&TANKA_SLOTS);
pub const DODOITSU: Pattern = Pattern::new(&DODOITSU_SLOTS);

/// The verse forms the detector knows about, in reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerseForm {
    /// 5-7-5
    Senryu,
    /// 5-7-5-7-7
    Tanka,
    /// 7-7-7-5
    Dodoitsu,
}

impl VerseForm {
    pub const ALL: [VerseForm; 3] = [Self::Senryu, Self::Tanka, Self::Dodoitsu];

    pub fn pattern(self) -> Pattern {
        match self {
            Self::Senryu => SENRYU,
            Self::Tanka => TANKA,
            Self::Dodoitsu => DODOITSU,
        }
    }

    /// Digits of the mora layout, e.g. `575`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Senryu => "575",
            Self::Tanka => "57577",
            Self::Dodoitsu => "7775",
        }
    }

    pub fn label(self) -> String {
        format!("Found {} 👮", self.code())
    }
}
