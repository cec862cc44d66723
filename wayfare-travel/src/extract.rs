//! Heuristic extraction of flight facts from conversation history.
//!
//! The hotel agent uses this to pick up where the flight agent left off. The
//! rules are deliberately simple keyword matches; results are hints for the
//! model, not authoritative booking data.
//!
//! Rules, applied to messages in chronological order (later matches win):
//!
//! - A user message mentioning "flight" or "book" contributes a destination
//!   (the word after the last "to") and a date word (the first of "tomorrow",
//!   "today", "next week", or a month name that appears).
//! - An assistant message mentioning both "flight" and "booked" marks the
//!   flight as confirmed.
//! - System messages are ignored.

use crate::text::{contains_word, title_case};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use wayfare_core::{Message, Role};

const INTENT_WORDS: &[&str] = &["flight", "book"];

const DATE_WORDS: &[&str] = &[
    "tomorrow",
    "today",
    "next week",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static DESTINATION_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_destination_regex() -> &'static Regex {
    DESTINATION_REGEX.get_or_init(|| Regex::new(r"\bto\s+([\w'-]+)").expect("Invalid regex pattern"))
}

/// Facts recovered from the history. All fields absent means nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactSet {
    /// Title-cased word after the last "to" in a booking request.
    pub destination: Option<String>,
    /// Title-cased date word, e.g. "Tomorrow" or "December".
    pub date: Option<String>,
    /// An assistant message reported the flight as booked.
    pub confirmed: bool,
}

impl FactSet {
    pub fn is_empty(&self) -> bool {
        self.destination.is_none() && self.date.is_none() && !self.confirmed
    }

    /// Briefing block for the hotel agent's greeting, or `None` when empty.
    pub fn briefing(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!(
            "IMPORTANT CONTEXT FROM FLIGHT BOOKING:\n\
             - The user has already booked a flight\n\
             - Destination: {}\n\
             - Travel Date: {}\n\
             - Flight Status: {}\n\
             \n\
             Based on this information, suggest a hotel in the same destination city and around the same travel dates.",
            self.destination.as_deref().unwrap_or("Not specified"),
            self.date.as_deref().unwrap_or("Not specified"),
            if self.confirmed { "Confirmed" } else { "In progress" },
        ))
    }
}

/// Scans history for flight facts.
pub struct ContextExtractor;

impl ContextExtractor {
    pub fn extract<'a, I>(history: I) -> FactSet
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut facts = FactSet::default();
        for message in history {
            let content = message.content.to_lowercase();
            match message.role {
                Role::User => {
                    if !INTENT_WORDS.iter().any(|word| content.contains(word)) {
                        continue;
                    }
                    if let Some(destination) = destination(&content) {
                        facts.destination = Some(destination);
                    }
                    if let Some(word) = DATE_WORDS.iter().find(|word| contains_word(&content, word)) {
                        facts.date = Some(title_case(word));
                    }
                }
                Role::Assistant => {
                    if content.contains("flight") && content.contains("booked") {
                        facts.confirmed = true;
                    }
                }
                Role::System => {}
            }
        }
        facts
    }
}

fn destination(content: &str) -> Option<String> {
    let captures = get_destination_regex().captures_iter(content).last()?;
    let word = captures.get(1)?.as_str().trim_matches(|c: char| !c.is_alphanumeric());
    (!word.is_empty()).then(|| title_case(word))
}
