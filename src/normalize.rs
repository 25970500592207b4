//! Text cleanup for service results
//!
//! Reverso marks the matched part of a text with inline tags such as
//! `<em>...</em>` or `<b>...</b>`. Those tags never nest or overlap in the
//! data it returns, so a single non-greedy pass removes them. This is not
//! an HTML parser and must not be used as one.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));

/// Key prefix of the numbered translation fields in history entries
const TRANSLATION_PREFIX: &str = "translation";

/// Remove tag-like substrings (`<` ... `>`) from text
pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Strip tags only when cleanup was requested
pub fn cleanup_if(text: String, cleanup: bool) -> String {
    if cleanup {
        strip_tags(&text)
    } else {
        text
    }
}

/// Collect `translation1`, `translation2`, ... values in numeric order
///
/// Empty and null values are skipped, as are keys without a numeric suffix.
pub fn ordered_translations(fields: &HashMap<String, Value>) -> Vec<String> {
    let mut numbered: Vec<(u32, &str)> = fields
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix(TRANSLATION_PREFIX)?.parse::<u32>().ok()?;
            let text = value.as_str().filter(|s| !s.is_empty())?;
            Some((index, text))
        })
        .collect();
    numbered.sort_unstable_by_key(|(index, _)| *index);
    numbered.into_iter().map(|(_, text)| text.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("<em>cellar door</em>", "cellar door" ; "emphasis")]
    #[test_case("<b>Bew</b>ertung", "Bewertung" ; "bold prefix")]
    #[test_case("And Dad still hasn't fixed the <em>cellar door</em>.", "And Dad still hasn't fixed the cellar door." ; "sentence")]
    #[test_case("no tags here", "no tags here" ; "plain text unchanged")]
    #[test_case("a < b and c > d", "a  d" ; "comparison operators look like a tag")]
    #[test_case("<span class=\"x\">hi</span>", "hi" ; "attributes")]
    #[test_case("", "" ; "empty")]
    fn test_strip_tags(input: &str, expected: &str) {
        assert_eq!(strip_tags(input), expected);
    }

    #[test]
    fn test_strip_tags_idempotent() {
        let samples = [
            "<em>cellar door</em>",
            "Casey, ich bin vor der <em>Kellertür</em>.",
            "<<em>>x",
            "plain",
        ];
        for sample in samples {
            let once = strip_tags(sample);
            assert_eq!(strip_tags(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_strip_tags_does_not_cross_lines() {
        assert_eq!(strip_tags("<em\n>x"), "<em\n>x");
    }

    #[test]
    fn test_cleanup_if() {
        assert_eq!(cleanup_if("<b>x</b>".to_string(), true), "x");
        assert_eq!(cleanup_if("<b>x</b>".to_string(), false), "<b>x</b>");
    }

    #[test]
    fn test_ordered_translations() {
        let fields: HashMap<String, Value> = serde_json::from_value(json!({
            "translation10": "ten",
            "translation2": "two",
            "translation1": "one",
            "translation3": "",
            "translation4": null,
            "translationX": "bad",
            "srcText": "ignored"
        }))
        .unwrap();

        assert_eq!(ordered_translations(&fields), vec!["one", "two", "ten"]);
    }

    #[test]
    fn test_ordered_translations_empty() {
        assert!(ordered_translations(&HashMap::new()).is_empty());
    }
}
