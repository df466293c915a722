use crate::config::ExtractorConfig;
use crate::parsers::Outline;
use crate::parsers::text;
use regex::Regex;

/// Power phrases listed under the "Powers" section
///
/// The section is looked up below the "Powers and Abilities" heading when
/// there is one, otherwise anywhere in the page. It ends at the "Abilities"
/// heading or at the next heading of equal or higher rank.
pub fn extract_powers(outline: &Outline, config: &ExtractorConfig, pattern: &Regex) -> Vec<String> {
    let text = outline.text();

    let scope_start = outline
        .find(&config.powers_and_abilities_heading, 0..text.len())
        .map(|s| s.start)
        .unwrap_or(0);

    let Some(powers) = outline.find(&config.powers_heading, scope_start..text.len()) else {
        ::log::trace!("No powers section found");
        return Vec::new();
    };

    // Abilities may sit inside the section as a sibling sub-heading
    let body = outline.body(powers);
    let body = match outline.find(&config.abilities_heading, powers.body_start..powers.end) {
        Some(abilities) => &body[..abilities.start - powers.body_start],
        None => body,
    };

    pattern
        .find_iter(body)
        .map(|m| clean_power(m.as_str()))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Lowercases a bold power term and strips its markup
pub fn clean_power(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('*', "").replace('-', " ");
    let trimmed = lowered.trim().trim_end_matches(':');
    text::collapse_whitespace(trimmed)
}
