//! # Field Tokenizer
//!
//! Splits a frame line into a field name and its positional value tokens.
//! Historical meters separate tokens with spaces, standard meters with tabs;
//! both are accepted and runs of separators collapse.
//!
//! The last token of a line is the checksum slot. Decoders read values by
//! position and never look at it.

use crate::constants::{TIC_SEPARATOR_SPACE, TIC_SEPARATOR_TAB};
use log::debug;
use nom::{
    bytes::complete::{take_while, take_while1},
    multi::many0,
    sequence::preceded,
    IResult,
};
use std::str::FromStr;

fn is_separator(c: char) -> bool {
    c == TIC_SEPARATOR_TAB || c == TIC_SEPARATOR_SPACE
}

fn token(input: &str) -> IResult<&str, &str> {
    preceded(take_while(is_separator), take_while1(|c| !is_separator(c)))(input)
}

/// Uses nom to split a line into its non-empty tokens.
pub fn tokenize(input: &str) -> Vec<&str> {
    match many0(token)(input) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    }
}

/// One tokenized information group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine<'a> {
    /// Field label as transmitted (compare with [`FieldLine::key`]).
    pub name: &'a str,
    /// Value tokens followed by the checksum token.
    pub tokens: Vec<&'a str>,
}

impl<'a> FieldLine<'a> {
    /// Tokenizes a line; lines with fewer than two tokens carry no field.
    pub fn parse(line: &'a str) -> Option<FieldLine<'a>> {
        let mut tokens = tokenize(line);
        if tokens.len() < 2 {
            return None;
        }
        let name = tokens.remove(0);
        Some(FieldLine { name, tokens })
    }

    /// Lowercased label, used for case-insensitive dispatch.
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    /// Value token at `index`, if transmitted.
    pub fn value(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// First value token, copied verbatim.
    pub fn text(&self) -> String {
        self.value(0).unwrap_or_default().to_string()
    }

    /// All tokens except the trailing checksum, joined with single spaces.
    pub fn joined_text(&self) -> String {
        let end = self.tokens.len().saturating_sub(1);
        self.tokens[..end].join(" ")
    }

    /// Numeric value at `index`, zero when absent or malformed.
    pub fn number<T>(&self, index: usize) -> T
    where
        T: FromStr + Default,
    {
        parse_number(self.name, self.value(index))
    }
}

/// Parses a decimal token into the field's integer type.
///
/// A missing, malformed or out-of-range token yields `T::default()` (zero).
/// Decoding is best effort: one bad field never discards the frame, and a
/// zero reading cannot be told apart from an absent one.
pub fn parse_number<T>(name: &str, token: Option<&str>) -> T
where
    T: FromStr + Default,
{
    match token {
        Some(raw) if is_decimal(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            debug!("Invalid numeric value {raw:?} for {name}, using zero");
            T::default()
        }),
        Some(raw) => {
            debug!("Invalid numeric value {raw:?} for {name}, using zero");
            T::default()
        }
        None => {
            debug!("Missing value for {name}, using zero");
            T::default()
        }
    }
}

/// ASCII digits with an optional leading minus sign.
fn is_decimal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
