use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

/// Date layouts the site renders, tried in order
///
/// * `Sep 27, 2021 06:16 AM` on most pages
/// * `Sep 27, 2021, 06:16 AM` on beta notes
/// * `Sep 27, 2021 06:16AM` on the beta note list
pub const DATE_FORMATS: [&str; 3] = [
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y, %I:%M %p",
    "%b %d, %Y %I:%M%p",
];

fn ordinal_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\b").ok())
        .as_ref()
}

fn thumbnail_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:https?:)?//t\.(?:facdn|furaffinity)\.net/(\d+)@(\d+)-(\d+)").ok()
    })
    .as_ref()
}

/// Parses one of the site's human-readable dates into a UTC instant
///
/// A leading `"on "` and ordinal suffixes (`27th`) are stripped first. The
/// wall-clock time is read in `timezone` when one is given, otherwise as UTC.
///
/// # Arguments
///
/// * `raw` - The visible text or tooltip of a date element
/// * `timezone` - The zone the viewing account renders times in
///
/// # Returns
///
/// * `Some(DateTime<Utc>)` - The first format that parsed
/// * `None` - Empty input or no format matched
pub fn read_date_when(raw: &str, timezone: Option<&Tz>) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("on ").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = match ordinal_regex() {
        Some(re) => re.replace_all(trimmed, "$1").into_owned(),
        None => trimmed.to_string(),
    };

    let naive = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&cleaned, format).ok())?;

    match timezone {
        Some(tz) => localize(tz, naive),
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

/// Resolves a wall-clock time in `tz`
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// spring-forward gap do not exist; they are shifted forward by an hour.
fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads the upload time embedded in a thumbnail URL
///
/// Thumbnails look like `//t.furaffinity.net/{id}@{size}-{unix}.jpg`.
pub fn thumbnail_date(src: &str) -> Option<DateTime<Utc>> {
    let caps = thumbnail_regex()?.captures(src.trim())?;
    let seconds: i64 = caps.get(3)?.as_str().parse().ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}

/// Converts a `data-timestamp` unix value
pub fn unix_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let seconds: i64 = raw.trim().parse().ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_standard_format_in_pacific_time() {
        let tz: Tz = "US/Pacific".parse().unwrap();
        let parsed = read_date_when("Oct 24, 2024 08:01 PM", Some(&tz));
        assert_eq!(parsed, Some(utc("2024-10-25T03:01:00Z")));
    }

    #[test]
    fn test_without_timezone_reads_utc() {
        let parsed = read_date_when("Oct 24, 2024 08:01 PM", None);
        assert_eq!(parsed, Some(utc("2024-10-24T20:01:00Z")));
    }

    #[test]
    fn test_all_formats_and_prefixes() {
        let expected = Some(utc("2021-09-27T06:16:00Z"));
        assert_eq!(read_date_when("Sep 27th, 2021 06:16 AM", None), expected);
        assert_eq!(read_date_when("Sep 27th, 2021, 06:16 AM", None), expected);
        assert_eq!(read_date_when("Sep 27, 2021 06:16AM", None), expected);
        assert_eq!(read_date_when("on Sep 27th, 2021 06:16 AM", None), expected);
        assert_eq!(read_date_when("  Sep 27, 2021 06:16 AM \n", None), expected);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(
            read_date_when("Jan 1st, 2020 12:00 AM", None),
            Some(utc("2020-01-01T00:00:00Z"))
        );
        assert_eq!(
            read_date_when("Feb 2nd, 2020 12:30 PM", None),
            Some(utc("2020-02-02T12:30:00Z"))
        );
        assert_eq!(
            read_date_when("Mar 3rd, 2020 01:00 PM", None),
            Some(utc("2020-03-03T13:00:00Z"))
        );
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(read_date_when("", None), None);
        assert_eq!(read_date_when("yesterday", None), None);
        assert_eq!(read_date_when("a month ago", None), None);
        assert_eq!(read_date_when("Foo 99, 2021 06:16 AM", None), None);
    }

    #[test]
    fn test_timezone_round_trip() {
        let tz: Tz = "US/Pacific".parse().unwrap();
        for text in [
            "Oct 24, 2024 08:01 PM",
            "Jan 05, 2023 11:59 AM",
            "Jul 04, 2022 12:00 AM",
        ] {
            let instant = read_date_when(text, Some(&tz)).unwrap();
            let rendered = instant
                .with_timezone(&tz)
                .format(DATE_FORMATS[0])
                .to_string();
            assert_eq!(rendered, text);
        }
    }

    #[test]
    fn test_dst_gap_does_not_fail() {
        let tz: Tz = "US/Pacific".parse().unwrap();
        // 02:30 on 2024-03-10 does not exist in Pacific time
        let parsed = read_date_when("Mar 10, 2024 02:30 AM", Some(&tz));
        assert_eq!(parsed, Some(utc("2024-03-10T10:30:00Z")));
    }

    #[test]
    fn test_thumbnail_date() {
        let expected = Some(utc("2020-09-13T12:26:40Z"));
        assert_eq!(
            thumbnail_date("//t.furaffinity.net/123@200-1600000000.jpg"),
            expected
        );
        assert_eq!(
            thumbnail_date("https://t.furaffinity.net/123@400-1600000000.jpg"),
            expected
        );
        assert_eq!(thumbnail_date("//t.facdn.net/123@200-1600000000.jpg"), expected);
        assert_eq!(thumbnail_date("//d.furaffinity.net/art/x.png"), None);
        assert_eq!(thumbnail_date(""), None);
    }

    #[test]
    fn test_unix_timestamp() {
        assert_eq!(unix_timestamp("1600000000"), Some(utc("2020-09-13T12:26:40Z")));
        assert_eq!(unix_timestamp("soon"), None);
    }
}
