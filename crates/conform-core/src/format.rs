//! # Format Validators
//!
//! Pure string-format predicates behind the `$email`, `$url`, `$uuid`,
//! `$ipv4`, `$isodate` (and sibling) rules. Each pattern is compiled once
//! per process. Digit classes are spelled `[0-9]` so they stay ASCII-only.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// =============================================================================
// PATTERNS
// =============================================================================

const IPV4: &str = r"(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])){3}";

const IPV6: &str = concat!(
    r"((?:[0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,7}:",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,6}:[0-9A-Fa-f]{1,4}",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,5}(?::[0-9A-Fa-f]{1,4}){1,2}",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,4}(?::[0-9A-Fa-f]{1,4}){1,3}",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,3}(?::[0-9A-Fa-f]{1,4}){1,4}",
    r"|(?:[0-9A-Fa-f]{1,4}:){1,2}(?::[0-9A-Fa-f]{1,4}){1,5}",
    r"|[0-9A-Fa-f]{1,4}(?::[0-9A-Fa-f]{1,4}){1,6}",
    r"|:(?:(?::[0-9A-Fa-f]{1,4}){1,7}|:))",
);

/// A pattern that failed to compile matches nothing; `all_patterns_compile`
/// in the tests keeps that branch unreachable.
fn compile(source: &str) -> Option<Regex> {
    Regex::new(source).ok()
}

fn anchored(source: &str) -> Option<Regex> {
    compile(&format!("^(?:{source})$"))
}

fn test(pattern: &Lazy<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

static EMOJI_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"\p{Extended_Pictographic}"));

static BASE64_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
});

static BASE64URL_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"^(?:[A-Za-z0-9_-]{4})*(?:[A-Za-z0-9_-]{2}==|[A-Za-z0-9_-]{3}=)?$")
});

static NANOID_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^[A-Za-z0-9_-]{21}$"));

static CUID_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"(?i)^c[^\s-]{8,}$"));

static CUID2_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^[a-z0-9]{24}$"));

static ULID_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"(?i)^[0-9A-HJKMNP-TV-Z]{26}$"));

static IPV4_RE: Lazy<Option<Regex>> = Lazy::new(|| anchored(IPV4));

static IPV6_RE: Lazy<Option<Regex>> = Lazy::new(|| anchored(IPV6));

static CIDR_PREFIX_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^[0-9]{1,3}$"));

static ISO_DATE_RE: Lazy<Option<Regex>> = Lazy::new(|| compile(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));

static ISO_TIME_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(
        r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](?:\.[0-9]+)?(?:Z|[+-](?:[01][0-9]|2[0-3]):[0-5][0-9])?$",
    )
});

static ISO_DURATION_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(concat!(
        r"^P(?:[0-9]+(?:\.[0-9]+)?Y)?(?:[0-9]+(?:\.[0-9]+)?M)?(?:[0-9]+(?:\.[0-9]+)?W)?",
        r"(?:[0-9]+(?:\.[0-9]+)?D)?",
        r"(?:T(?:[0-9]+(?:\.[0-9]+)?H)?(?:[0-9]+(?:\.[0-9]+)?M)?(?:[0-9]+(?:\.[0-9]+)?S)?)?$",
    ))
});

fn uuid_pattern(version: &str) -> Option<Regex> {
    compile(&format!(
        "(?i)^[0-9a-f]{{8}}-[0-9a-f]{{4}}-{version}[0-9a-f]{{3}}-[89ab][0-9a-f]{{3}}-[0-9a-f]{{12}}$"
    ))
}

static UUID_ANY_RE: Lazy<Option<Regex>> = Lazy::new(|| uuid_pattern("[1-5]"));

static UUID_VERSION_RES: Lazy<[Option<Regex>; 5]> = Lazy::new(|| {
    [
        uuid_pattern("1"),
        uuid_pattern("2"),
        uuid_pattern("3"),
        uuid_pattern("4"),
        uuid_pattern("5"),
    ]
});

// =============================================================================
// PREDICATES
// =============================================================================

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_email(text: &str) -> bool {
    test(&EMAIL_RE, text)
}

/// The text between the first and second `@`, empty when there is none.
pub fn email_domain(text: &str) -> &str {
    text.split('@').nth(1).unwrap_or("")
}

/// Parse an absolute URL.
pub fn parse_url(text: &str) -> Option<Url> {
    Url::parse(text).ok()
}

/// RFC 4122 layout with version digit `1`-`5`, or exactly `version` when given.
///
/// Versions outside `1..=5` never match.
pub fn is_uuid(text: &str, version: Option<u8>) -> bool {
    match version {
        None => test(&UUID_ANY_RE, text),
        Some(v @ 1..=5) => UUID_VERSION_RES[usize::from(v - 1)]
            .as_ref()
            .is_some_and(|re| re.is_match(text)),
        Some(_) => false,
    }
}

/// True if the text contains an extended pictographic character.
pub fn is_emoji(text: &str) -> bool {
    test(&EMOJI_RE, text)
}

pub fn is_base64(text: &str) -> bool {
    test(&BASE64_RE, text)
}

pub fn is_base64url(text: &str) -> bool {
    test(&BASE64URL_RE, text)
}

pub fn is_nanoid(text: &str) -> bool {
    test(&NANOID_RE, text)
}

pub fn is_cuid(text: &str) -> bool {
    test(&CUID_RE, text)
}

/// 24 lowercase alphanumerics.
pub fn is_cuid2(text: &str) -> bool {
    test(&CUID2_RE, text)
}

/// 26 Crockford base32 characters, case-insensitive.
pub fn is_ulid(text: &str) -> bool {
    test(&ULID_RE, text)
}

pub fn is_ipv4(text: &str) -> bool {
    test(&IPV4_RE, text)
}

pub fn is_ipv6(text: &str) -> bool {
    test(&IPV6_RE, text)
}

/// Split `addr/prefix` on exactly one slash with a one to three digit prefix.
fn split_cidr(text: &str) -> Option<(&str, u32)> {
    let (addr, prefix) = text.split_once('/')?;
    if !test(&CIDR_PREFIX_RE, prefix) {
        return None;
    }
    prefix.parse().ok().map(|p| (addr, p))
}

pub fn is_cidrv4(text: &str) -> bool {
    split_cidr(text).is_some_and(|(addr, prefix)| prefix <= 32 && is_ipv4(addr))
}

pub fn is_cidrv6(text: &str) -> bool {
    split_cidr(text).is_some_and(|(addr, prefix)| prefix <= 128 && is_ipv6(addr))
}

/// `YYYY-MM-DD` naming a real calendar day.
pub fn is_iso_date(text: &str) -> bool {
    test(&ISO_DATE_RE, text) && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// `HH:MM:SS[.fraction][Z|+HH:MM|-HH:MM]`.
pub fn is_iso_time(text: &str) -> bool {
    test(&ISO_TIME_RE, text)
}

/// A date and time joined by `T`: RFC 3339, or offset-less with optional seconds.
pub fn is_iso_datetime(text: &str) -> bool {
    if !text.contains('T') {
        return false;
    }
    DateTime::parse_from_rfc3339(text).is_ok()
        || ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
}

/// `P` followed by date and time components. Bare `P` is rejected.
pub fn is_iso_duration(text: &str) -> bool {
    text != "P" && test(&ISO_DURATION_RE, text)
}

/// No leading or trailing whitespace, counting the byte-order mark.
pub fn is_trimmed(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}') == text
}

pub fn is_lower_case(text: &str) -> bool {
    text.to_lowercase() == text
}

pub fn is_upper_case(text: &str) -> bool {
    text.to_uppercase() == text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for pattern in [
            &EMAIL_RE,
            &EMOJI_RE,
            &BASE64_RE,
            &BASE64URL_RE,
            &NANOID_RE,
            &CUID_RE,
            &CUID2_RE,
            &ULID_RE,
            &IPV4_RE,
            &IPV6_RE,
            &CIDR_PREFIX_RE,
            &ISO_DATE_RE,
            &ISO_TIME_RE,
            &ISO_DURATION_RE,
            &UUID_ANY_RE,
        ] {
            assert!(pattern.is_some());
        }
        assert!(UUID_VERSION_RES.iter().all(Option::is_some));
    }

    #[test]
    fn email() {
        assert!(is_email("foo@example.com"));
        assert!(!is_email("foo@example"));
        assert!(!is_email("foo bar@example.com"));
        assert!(!is_email("a@b@c.com"));
        assert_eq!(email_domain("foo@example.com"), "example.com");
        assert_eq!(email_domain("nodomain"), "");
    }

    #[test]
    fn url() {
        let parsed = parse_url("https://example.com/path").unwrap();
        assert_eq!(parsed.host_str(), Some("example.com"));
        assert_eq!(parsed.scheme(), "https");
        assert!(parse_url("not a url").is_none());
    }

    #[test]
    fn uuid_versions() {
        let v4 = "123e4567-e89b-42d3-a456-426614174000";
        assert!(is_uuid(v4, None));
        assert!(is_uuid(v4, Some(4)));
        assert!(!is_uuid(v4, Some(1)));
        assert!(is_uuid(&v4.to_uppercase(), None));
        assert!(!is_uuid("123e4567-e89b-62d3-a456-426614174000", None));
        assert!(!is_uuid("123e4567-e89b-42d3-c456-426614174000", None));
        assert!(!is_uuid(v4, Some(9)));
    }

    #[test]
    fn emoji_is_a_contains_test() {
        assert!(is_emoji("😀"));
        assert!(is_emoji("hi 😀"));
        assert!(!is_emoji("plain"));
    }

    #[test]
    fn base64_padding() {
        assert!(is_base64("aGVsbG8="));
        assert!(is_base64(""));
        assert!(!is_base64("aGVsbG8"));
        assert!(is_base64url("aGk_-w=="));
        assert!(!is_base64url("aGk+/w=="));
    }

    #[test]
    fn id_formats() {
        assert!(is_nanoid("V1StGXR8_Z5jdHi6B-myT"));
        assert!(!is_nanoid("short"));
        assert!(is_cuid("cjld2cjxh0000qzrmn831i7rn"));
        assert!(!is_cuid("xjld2cjxh0000"));
        assert!(is_cuid2("tz4a98xxat96iws9zmbrgj3a"));
        assert!(!is_cuid2("TZ4A98XXAT96IWS9ZMBRGJ3A"));
        assert!(is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(!is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FAU"));
    }

    #[test]
    fn ip_addresses() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(!is_ipv4("01.1.1.1"));
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("2001:db8::ff00:42:8329"));
        assert!(!is_ipv6("2001:db8:::1"));
    }

    #[test]
    fn cidr_prefixes() {
        assert!(is_cidrv4("10.0.0.0/8"));
        assert!(is_cidrv4("10.0.0.0/32"));
        assert!(!is_cidrv4("10.0.0.0/33"));
        assert!(!is_cidrv4("10.0.0.0"));
        assert!(!is_cidrv4("10.0.0.0/"));
        assert!(!is_cidrv4("10.0.0.0/8/9"));
        assert!(is_cidrv6("2001:db8::/32"));
        assert!(!is_cidrv6("2001:db8::/129"));
    }

    #[test]
    fn iso_date_and_time() {
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-30"));
        assert!(!is_iso_date("2024-2-1"));
        assert!(is_iso_time("23:59:59"));
        assert!(is_iso_time("12:00:00.123Z"));
        assert!(is_iso_time("12:00:00+05:30"));
        assert!(!is_iso_time("24:00:00"));
    }

    #[test]
    fn iso_datetime_needs_separator() {
        assert!(is_iso_datetime("2024-01-02T03:04:05Z"));
        assert!(is_iso_datetime("2024-01-02T03:04:05.123+01:00"));
        assert!(is_iso_datetime("2024-01-02T03:04"));
        assert!(!is_iso_datetime("2024-01-02 03:04:05Z"));
        assert!(!is_iso_datetime("Tuesday"));
    }

    #[test]
    fn iso_duration() {
        assert!(is_iso_duration("P1Y2M3DT4H5M6S"));
        assert!(is_iso_duration("P2W"));
        assert!(is_iso_duration("PT0.5S"));
        assert!(!is_iso_duration("P"));
        assert!(!is_iso_duration("1Y"));
    }

    #[test]
    fn case_and_trim_assertions() {
        assert!(is_trimmed("abc"));
        assert!(!is_trimmed(" abc"));
        assert!(!is_trimmed("abc\u{feff}"));
        assert!(is_lower_case("abc1"));
        assert!(!is_lower_case("Abc"));
        assert!(is_upper_case("ABC1"));
        assert!(!is_upper_case("ABc"));
    }
}
