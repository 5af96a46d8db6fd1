//! Phrase extraction from raw prompt text.
//!
//! Prompts are split on commas first. Any phrase longer than
//! [`LONG_PHRASE_THRESHOLD`] characters is additionally split on connector
//! words, and those fragments are appended after the primary phrases. The long
//! phrase itself keeps its place, so its content can appear twice.

use std::sync::OnceLock;

use regex::Regex;

/// Phrases longer than this (in characters) are re-split on connectors
pub const LONG_PHRASE_THRESHOLD: usize = 100;

/// Fragments must be longer than this (in characters) to be kept
pub const MIN_FRAGMENT_LEN: usize = 5;

const CONNECTOR_PATTERN: &str = r"\s+(?:with|and|from|amid|in|on|at|forming)\s+";

fn connector_regex() -> &'static Regex {
    static CONNECTOR: OnceLock<Regex> = OnceLock::new();
    CONNECTOR.get_or_init(|| Regex::new(CONNECTOR_PATTERN).expect("valid connector regex"))
}

/// Extract candidate phrases from prompt text, in encounter order.
pub fn extract_phrases(text: &str) -> Vec<String> {
    let mut phrases: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let fragments: Vec<String> = phrases
        .iter()
        .filter(|p| p.chars().count() > LONG_PHRASE_THRESHOLD)
        .flat_map(|p| split_on_connectors(p))
        .collect();

    if !fragments.is_empty() {
        tracing::debug!(count = fragments.len(), "long phrases re-split");
    }

    phrases.extend(fragments);
    phrases
}

/// Split one phrase on connector words, keeping fragments over the minimum length.
///
/// Returns nothing when no connector is present.
fn split_on_connectors(phrase: &str) -> Vec<String> {
    let pieces: Vec<&str> = connector_regex().split(phrase).collect();
    if pieces.len() < 2 {
        return Vec::new();
    }

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| p.chars().count() > MIN_FRAGMENT_LEN)
        .map(str::to_string)
        .collect()
}
