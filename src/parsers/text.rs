/// Tidies rendered text: trims every line, collapses whitespace inside lines,
/// and keeps exactly one blank line between paragraphs.
pub fn tidy(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    split_into_paragraphs(text)
        .iter()
        .map(|paragraph| {
            paragraph
                .iter()
                .map(|line| collapse_whitespace(line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Joins all lines into one and collapses whitespace runs to a single space
pub fn flatten(text: &str) -> String {
    collapse_whitespace(text)
}

/// Splits text into paragraphs based on empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current_paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut current_paragraph));
            }
        } else {
            current_paragraph.push(trimmed);
        }
    }

    if !current_paragraph.is_empty() {
        paragraphs.push(current_paragraph);
    }

    paragraphs
}

/// Collapses every whitespace run (newlines included) into one space and trims
pub fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
