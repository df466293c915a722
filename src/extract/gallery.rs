use crate::parsers::Outline;
use crate::parsers::text;
use regex::Regex;
use std::sync::LazyLock;

static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("static citation pattern"));

/// Compiled lookup rules for one info-box field
#[derive(Debug)]
pub struct FieldMatcher {
    pub name: String,
    label: Regex,
    token: Regex,
}

impl FieldMatcher {
    /// Matches `prefix` followed by `name`, where whitespace in the name
    /// matches any whitespace run (rendered labels may be wrapped).
    pub fn new(name: &str, prefix: &str) -> Result<Self, regex::Error> {
        let words = name
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");

        Ok(Self {
            name: name.to_string(),
            label: Regex::new(&format!("{}{}", regex::escape(prefix), words))?,
            token: Regex::new(&words)?,
        })
    }

    /// Raw value between the label and `terminator`, if the label exists
    pub fn find_in<'t>(&self, region: &'t str, terminator: &str) -> Option<&'t str> {
        let label = self.label.find(region)?;
        let rest = &region[label.end()..];
        let stop = rest.find(terminator).unwrap_or(rest.len());
        Some(&rest[..stop])
    }

    /// Cleaned value for this field; empty when the label is absent
    pub fn value(&self, region: &str, terminator: &str) -> String {
        self.find_in(region, terminator)
            .map(|raw| self.clean(raw))
            .unwrap_or_default()
    }

    /// Removes repeated labels, line breaks, markup and citation markers
    pub fn clean(&self, raw: &str) -> String {
        let value = self.token.replace_all(raw, " ");
        let value = value.replace(['\n', '\r'], " ").replace('_', "");
        let value = strip_loose_hyphens(&value);
        let value = CITATION_RE.replace_all(&value, "");
        text::collapse_whitespace(&value)
    }
}

/// Info-box region: from the first `start` literal to the `end_heading` section
pub fn gallery_region<'a>(outline: &Outline<'a>, start: &str, end_heading: &str) -> &'a str {
    let text = outline.text();
    let from = text.find(start).unwrap_or(0);
    let to = outline
        .find(end_heading, from..text.len())
        .map(|s| s.start)
        .unwrap_or(text.len());
    &text[from..to]
}

/// Drops hyphens unless they join two word characters (`Spider-Man` stays)
fn strip_loose_hyphens(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != '-' {
                return true;
            }
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            matches!((before, after), (Some(b), Some(a)) if b.is_alphanumeric() && a.is_alphanumeric())
        })
        .map(|(_, &c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_label_matches() {
        let field = FieldMatcher::new("Current Alias", ") ").unwrap();
        let region = "![](a.png) Current\nAlias\nSpider-Man\n### next";
        assert_eq!(field.value(region, "###"), "Spider-Man");
    }

    #[test]
    fn test_clean_removes_noise() {
        let field = FieldMatcher::new("Height", ") ").unwrap();
        let cleaned = field.clean(" Height 5'10\"[1]\n  _(178 cm)_ -- --- Height  ");
        assert_eq!(cleaned, "5'10\" (178 cm)");
    }

    #[test]
    fn test_missing_label_is_empty() {
        let field = FieldMatcher::new("Creators", ") ").unwrap();
        assert_eq!(field.value("nothing here ### at all", "###"), "");
    }

    #[test]
    fn test_value_without_terminator_runs_to_region_end() {
        let field = FieldMatcher::new("Eyes", ") ").unwrap();
        assert_eq!(field.value("x) Eyes Blue", "###"), "Blue");
    }

    #[test]
    fn test_name_inside_longer_word_is_removed() {
        let field = FieldMatcher::new("Origin", ") ").unwrap();
        let value = field.value("![](i) Origin Originally human\n### History", "###");
        assert!(!value.contains("Origin"));
        assert_eq!(value, "ally human");

        let field = FieldMatcher::new("Real Name", ") ").unwrap();
        let value = field.value("![](i) Real Name Real Names unknown ###", "###");
        assert!(!value.contains("Real Name"));
        assert_eq!(value, "s unknown");
    }

    #[test]
    fn test_strip_loose_hyphens() {
        assert_eq!(strip_loose_hyphens("- Spider-Man -"), " Spider-Man ");
        assert_eq!(strip_loose_hyphens("a - b"), "a  b");
    }
}
