use crate::parsers::text;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(#{1,6})[ \t]+(.*?)[ \t#]*$").expect("static heading pattern")
});

/// Trailing bracketed edit links, e.g. `Powers [ edit ]`
static EDIT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[[^\]]*\]\s*$").expect("static suffix pattern"));

/// One heading-delimited section of rendered text
///
/// A section spans its own sub-sections: `end` is the offset of the next
/// heading of the same or a higher rank, or the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Number of `#` markers
    pub level: usize,
    /// Heading text without markers
    pub title: String,
    /// Offset of the heading line
    pub start: usize,
    /// Offset right after the heading line
    pub body_start: usize,
    /// Offset where the section ends
    pub end: usize,
}

/// Heading outline of a rendered page
#[derive(Debug)]
pub struct Outline<'a> {
    text: &'a str,
    sections: Vec<Section>,
}

/// Segments rendered text into heading-delimited sections
pub fn segment(text: &str) -> Outline<'_> {
    let mut sections = Vec::new();

    for caps in HEADING_RE.captures_iter(text) {
        let (Some(whole), Some(marks), Some(title)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        sections.push(Section {
            level: marks.as_str().len(),
            title: title.as_str().trim().to_string(),
            start: whole.start(),
            body_start: whole.end(),
            end: text.len(),
        });
    }

    for i in 0..sections.len() {
        let level = sections[i].level;
        let next = sections[i + 1..]
            .iter()
            .find(|s| s.level <= level)
            .map(|s| s.start);
        if let Some(next) = next {
            sections[i].end = next;
        }
    }

    ::log::trace!("Segmented text into {} sections", sections.len());
    Outline { text, sections }
}

impl<'a> Outline<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section titled `title` whose heading starts inside `scope`
    pub fn find(&self, title: &str, scope: Range<usize>) -> Option<&Section> {
        let wanted = normalize_title(title);
        self.sections
            .iter()
            .filter(|s| scope.contains(&s.start))
            .find(|s| normalize_title(&s.title) == wanted)
    }

    /// Body text of a section, sub-sections included
    pub fn body(&self, section: &Section) -> &'a str {
        &self.text[section.body_start..section.end]
    }
}

/// Lowercased title with emphasis markers and edit links removed
pub fn normalize_title(title: &str) -> String {
    let stripped = title.replace(['*', '_'], "");
    let stripped = EDIT_SUFFIX_RE.replace(&stripped, "");
    text::collapse_whitespace(&stripped).to_lowercase()
}
