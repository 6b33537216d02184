/// Rewrites a protocol-relative URL (`//host/path`) to `https://host/path`
///
/// Anything else is returned unchanged, so the function is idempotent.
pub fn fix_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_relative_becomes_https() {
        assert_eq!(
            fix_url("//d.furaffinity.net/art/a/1.png"),
            "https://d.furaffinity.net/art/a/1.png"
        );
    }

    #[test]
    fn test_other_forms_pass_through() {
        assert_eq!(fix_url("/view/123/"), "/view/123/");
        assert_eq!(fix_url("https://example.com/x"), "https://example.com/x");
        assert_eq!(fix_url("http://example.com/x"), "http://example.com/x");
        assert_eq!(fix_url(""), "");
    }

    #[test]
    fn test_fix_url_is_idempotent() {
        for input in [
            "//t.furaffinity.net/1@200-1600000000.jpg",
            "https://www.furaffinity.net/user/someone/",
            "/gallery/someone/2/",
        ] {
            let once = fix_url(input);
            assert_eq!(fix_url(&once), once);
        }
    }
}
