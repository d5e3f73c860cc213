//! Core domain + application logic for the verse-spotting chat bot.
//!
//! The verse detector lives in [`verse`] and is pure. The tokenizer and the
//! messenger live behind ports (traits) implemented in adapter crates.

pub mod bot;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod security;
pub mod tokenizer;
pub mod verse;

pub use errors::{Error, Result};
