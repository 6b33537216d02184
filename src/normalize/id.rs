use regex::Regex;
use std::sync::OnceLock;

fn view_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/view/(\d+)").ok()).as_ref()
}

fn journal_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/journal/(\d+)").ok()).as_ref()
}

/// Extracts the submission ID from a `/view/{id}/` path or URL
pub fn view_id(path: &str) -> Option<u64> {
    capture_number(view_regex()?, path)
}

/// Extracts the journal ID from a `/journal/{id}/` path or URL
pub fn journal_id(path: &str) -> Option<u64> {
    capture_number(journal_regex()?, path)
}

fn capture_number(re: &Regex, haystack: &str) -> Option<u64> {
    re.captures(haystack)?.get(1)?.as_str().parse().ok()
}

/// Extracts the numeric part of a delimited element id
///
/// Element ids look like `sid-123`, `cid:456` or `featured_789`; the number is
/// the second segment.
///
/// # Arguments
///
/// * `raw` - The attribute value
/// * `separator` - The delimiter between prefix and number
pub fn split_id(raw: &str, separator: char) -> Option<u64> {
    let segment = raw.trim().split(separator).nth(1)?;
    leading_int(segment).and_then(|n| u64::try_from(n).ok())
}

/// Parses the leading integer of a string, ignoring trailing garbage
///
/// `"12 views"` gives 12, `"abc"` gives `None`.
pub fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
