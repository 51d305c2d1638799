//! Best-effort recovery of JSON records embedded in free-form model text.

use log::debug;
use serde::de::DeserializeOwned;

const FENCE_TAG: &str = "```json";
const FENCE: &str = "```";

/// A recovered record, flagged when it is the caller's default
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    /// Set when no candidate parsed and `value` is the supplied default
    pub degraded: bool,
}

/// Try each candidate in order: the interior of a ```json fence, then the
/// span from the first `{` to the last `}`
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Option<T> {
    if let Some(block) = fenced_block(text) {
        match serde_json::from_str::<T>(block) {
            Ok(value) => return Some(value),
            Err(e) => debug!("Fenced JSON block did not parse: {}", e),
        }
    }

    if let Some(span) = brace_span(text) {
        match serde_json::from_str::<T>(span) {
            Ok(value) => return Some(value),
            Err(e) => debug!("Brace-delimited span did not parse: {}", e),
        }
    }

    None
}

/// Like [`parse_structured`], but never fails: falls back to `default`
pub fn parse_or_default<T: DeserializeOwned>(text: &str, default: T) -> Parsed<T> {
    match parse_structured(text) {
        Some(value) => Parsed { value, degraded: false },
        None => Parsed { value: default, degraded: true },
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE_TAG)? + FENCE_TAG.len();
    let rest = &text[start..];
    let end = rest.find(FENCE)?;
    Some(rest[..end].trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{ json, Value };

    #[test]
    fn test_fenced_block_wins() {
        let parsed = parse_or_default("prefix ```json\n{\"a\":1}\n``` suffix", json!({}));
        assert_eq!(parsed.value, json!({"a": 1}));
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_brace_span_fallback() {
        let parsed = parse_or_default("noise {\"a\":1} noise", json!({}));
        assert_eq!(parsed.value, json!({"a": 1}));
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_no_braces_returns_default() {
        let default = json!({"default": true});
        let parsed = parse_or_default("no braces here", default.clone());
        assert_eq!(parsed.value, default);
        assert!(parsed.degraded);
    }

    #[test]
    fn test_broken_fence_falls_back_to_braces() {
        let text = "```json\nnot json\n```\nlater {\"b\":2}";
        let value: Option<Value> = parse_structured(text);
        assert_eq!(value, Some(json!({"b": 2})));
    }

    #[test]
    fn test_reversed_braces() {
        let value: Option<Value> = parse_structured("} oops {");
        assert!(value.is_none());
    }
}
