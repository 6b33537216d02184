use scraper::Html;

/// Elements whose text is never part of the readable page
const NOISE_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Renders an HTML document as whitespace-collapsed plain text
///
/// Used for the diagnostic body carried by site errors.
pub fn plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let in_noise = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| NOISE_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if in_noise {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

/// Removes the `~` the site prefixes to display names
pub fn strip_tilde(raw: &str) -> String {
    raw.trim().trim_start_matches('~').trim().to_string()
}

/// Removes one pair of surrounding double quotes
pub fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
