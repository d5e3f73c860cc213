//! Detection of fixed-form verses (5-7-5, 5-7-5-7-7, 7-7-7-5) in tokenized text.
//!
//! Everything here is pure and synchronous: morphemes in, matches and their
//! rendering out. An unmatched region is not an error, it just yields nothing.

pub mod finder;
pub mod form;
pub mod morpheme;
pub mod phrase;
pub mod render;

pub use finder::{find_dodoitsu, find_senryu, find_tanka, find_verses, Verse};
pub use form::{Pattern, Slot, VerseForm};
pub use morpheme::{Morpheme, PartOfSpeech, UNKNOWN_READING};
pub use phrase::{take_phrase, Phrase};
pub use render::{build_message, render_verse};
