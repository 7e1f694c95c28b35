//! Locate the JSON embedded in free-form model output.
//!
//! Models wrap JSON in prose, markdown fences, or nothing at all. Candidates
//! are tried in reliability order: fenced ```json block, then the greedy
//! `{...}` span, then the raw text. The first candidate that parses wins.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced json pattern is valid")
});

/// Which strategy produced the parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    FencedBlock,
    BraceSpan,
    RawText,
}

/// Inner text of the first ```json fenced block.
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// From the first `{` to the last `}`, inclusive.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Candidates in the fixed order fence → braces → raw.
pub fn candidates(text: &str) -> Vec<(Strategy, &str)> {
    let mut out = Vec::with_capacity(3);
    if let Some(inner) = fenced_block(text) {
        out.push((Strategy::FencedBlock, inner));
    }
    if let Some(span) = brace_span(text) {
        out.push((Strategy::BraceSpan, span));
    }
    out.push((Strategy::RawText, text));
    out
}

/// Parse the first candidate that is valid JSON. `None` when nothing parses.
pub fn localize(text: &str) -> Option<(Strategy, Value)> {
    for (strategy, candidate) in candidates(text) {
        match serde_json::from_str::<Value>(candidate.trim()) {
            Ok(value) => {
                debug!(?strategy, len = candidate.len(), "localized JSON");
                return Some((strategy, value));
            }
            Err(e) => debug!(?strategy, error = %e, "candidate did not parse"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_ignores_prose() {
        let text = "Sure! Here is the analysis:\n```json\n{\"foodItems\": []}\n```\nEnjoy your meal.";
        let (strategy, value) = localize(text).unwrap();
        assert_eq!(strategy, Strategy::FencedBlock);
        assert_eq!(value["foodItems"], serde_json::json!([]));
    }

    #[test]
    fn test_fence_without_newlines() {
        assert_eq!(fenced_block("```json{\"a\":1}```"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_first_fence_wins() {
        let text = "```json\n{\"a\":1}\n```\nand\n```json\n{\"a\":2}\n```";
        let (_, value) = localize(text).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_bare_object_via_brace_match() {
        let text = "The meal contains: {\"foodItems\": [{\"name\": \"egg\", \"calories\": 70}]} as requested";
        let (strategy, value) = localize(text).unwrap();
        assert_eq!(strategy, Strategy::BraceSpan);
        assert_eq!(value["foodItems"][0]["name"], "egg");
    }

    #[test]
    fn test_brace_span_is_greedy() {
        let text = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(brace_span(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_broken_fence_falls_through_to_braces() {
        let text = "```json\n{oops\n```\n{\"foodItems\": []}";
        // Brace span starts at the broken fence, so it fails too; raw text fails.
        assert!(localize(text).is_none());

        let text = "```json\nnot json\n```\n{\"foodItems\": []}";
        let (strategy, _) = localize(text).unwrap();
        assert_eq!(strategy, Strategy::BraceSpan);
    }

    #[test]
    fn test_raw_text_last_resort() {
        let (strategy, value) = localize("  [1, 2, 3] ").unwrap();
        assert_eq!(strategy, Strategy::RawText);
        assert!(value.is_array());
    }

    #[test]
    fn test_nothing_parses() {
        assert!(localize("I can see a sandwich, about 400 calories.").is_none());
    }
}
