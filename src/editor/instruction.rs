//! Parsing of free-text meal updates such as "I also had a banana" or
//! "I only ate 1/2 of my potatoes".

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ADD_ITEM_PHRASE: &str = "also had";

/// Leading words dropped from an added item ("a banana" -> "banana").
const ARTICLES: [&str; 4] = ["a ", "an ", "some ", "the "];

lazy_static! {
    static ref PORTION_RE: Regex =
        Regex::new(r"(?i)only ate (\d+/\d+) of my (\w+)").expect("valid portion regex");
}

/// A parsed meal update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    /// "... also had <item>"
    AddItem(String),
    /// "... only ate <n>/<d> of my <item>"
    AdjustPortion { fraction: Fraction, item: String },
    Unrecognized,
}

/// A `numerator/denominator` pair as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    #[error("Invalid fraction '{0}'. Use a form like 1/2.")]
    Malformed(String),
    #[error("Division by zero in fraction '{0}'")]
    DivisionByZero(Fraction),
}

impl Fraction {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Evaluates the fraction; a zero denominator is an error.
    pub fn ratio(&self) -> Result<f64, FractionError> {
        if self.denominator == 0 {
            return Err(FractionError::DivisionByZero(*self));
        }
        Ok(self.numerator as f64 / self.denominator as f64)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FractionError::Malformed(s.to_string());
        let (num, den) = s.split_once('/').ok_or_else(malformed)?;
        let numerator = num.trim().parse::<u64>().map_err(|_| malformed())?;
        let denominator = den.trim().parse::<u64>().map_err(|_| malformed())?;
        Ok(Self::new(numerator, denominator))
    }
}

fn strip_article(item: &str) -> &str {
    ARTICLES
        .iter()
        .find_map(|a| item.strip_prefix(a))
        .map(str::trim_start)
        .unwrap_or(item)
}

/// Classifies a free-text update. Matching is case-insensitive and the
/// "also had" phrasing wins when both appear.
pub fn parse_instruction(text: &str) -> ChatUpdate {
    let lower = text.to_lowercase();

    if let Some(pos) = lower.find(ADD_ITEM_PHRASE) {
        let item = strip_article(lower[pos + ADD_ITEM_PHRASE.len()..].trim());
        if item.is_empty() {
            return ChatUpdate::Unrecognized;
        }
        return ChatUpdate::AddItem(item.to_string());
    }

    if let Some(caps) = PORTION_RE.captures(text) {
        return match caps[1].parse::<Fraction>() {
            Ok(fraction) => ChatUpdate::AdjustPortion {
                fraction,
                item: caps[2].to_lowercase(),
            },
            // Digits too large for u64
            Err(_) => ChatUpdate::Unrecognized,
        };
    }

    ChatUpdate::Unrecognized
}
