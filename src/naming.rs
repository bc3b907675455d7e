//! Title sanitization for output file names
//!
//! Turns an arbitrary display title into a safe, human-readable filename
//! stem. The stem is display-oriented, not a machine key: path uniqueness
//! comes from the export timestamp, never from this function.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Stem used when the input sanitizes down to nothing
///
/// Already in sanitized form, so the fallback is its own fixed point.
const FALLBACK_STEM: &str = "Untitled";

/// Words kept lower-case unless they lead the title
const SMALL_WORDS: [&str; 8] = ["the", "and", "in", "on", "at", "to", "for", "of"];

static TRAILING_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(\d{4}-\d{2}-\d{2})_\d{2}-\d{2}-\d{2}$").unwrap());

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

static ILLEGAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

static REPEATED_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Convert a title into a readable filename stem
///
/// Steps, each total and idempotent: strip the time half of a trailing
/// generation timestamp (the date half is kept for relocation),
/// normalize separators, title-case (small words stay lower unless first),
/// relocate an ISO date to a trailing `" - (Mon DD YYYY)"`, strip characters
/// illegal in filenames, collapse whitespace. Never returns an empty string.
pub fn sanitize(title: &str) -> String {
    // Drop the time half of a trailing generation timestamp; the date half
    // stays behind for the relocation step below.
    let name = TRAILING_TIMESTAMP.replace(title, "_$1");
    let name = name.replace('_', " ");

    let mut words: Vec<String> = Vec::new();
    for word in name.split_whitespace() {
        let lower = word.to_lowercase();
        if SMALL_WORDS.contains(&lower.as_str()) && !words.is_empty() {
            words.push(lower);
        } else {
            words.push(capitalize_word(word));
        }
    }
    let mut name = words.join(" ");

    // A date-shaped token that is not a real date stays where it is
    let date = ISO_DATE
        .find(&name)
        .and_then(|found| NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d").ok());
    if let Some(date) = date {
        let without = ISO_DATE.replace(&name, "").trim().to_string();
        name = format!("{} - ({})", without, date.format("%b %d %Y"));
    }

    let name = ILLEGAL_CHARS.replace_all(&name, "");
    let name = REPEATED_WHITESPACE.replace_all(&name, " ");
    let name = name.trim();

    if name.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        name.to_string()
    }
}

/// Upper-case the first alphabetic character, lower-case the rest
///
/// Leading non-letters (digits, parentheses) pass through, so stems that
/// already carry a `"(Mon DD YYYY)"` suffix survive a second pass unchanged.
fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut seen_letter = false;
    for c in word.chars() {
        if !seen_letter && c.is_alphabetic() {
            seen_letter = true;
            out.extend(c.to_uppercase());
        } else if seen_letter {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("breaking_news", "Breaking News"; "underscores and casing")]
    #[test_case("the rundown of the day", "The Rundown of the Day"; "small words stay lower unless first")]
    #[test_case("storm warning for the coast", "Storm Warning for the Coast"; "for and the lowered")]
    #[test_case("a/b <testing> results?", "Ab Testing Results"; "illegal characters stripped")]
    #[test_case("  spaced    out  ", "Spaced Out"; "whitespace collapsed")]
    #[test_case("", "Untitled"; "empty input falls back")]
    #[test_case("<>:?*", "Untitled"; "all-stripped input falls back")]
    #[test_case("MARKETS RALLY", "Markets Rally"; "all caps normalized")]
    fn sanitize_cases(input: &str, expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_trailing_timestamp_stripped_and_date_relocated() {
        let stem = sanitize("breaking_news_2024-03-05_10-15-00");
        assert_eq!(stem, "Breaking News - (Mar 05 2024)");
    }

    #[test]
    fn test_inline_date_relocated() {
        let stem = sanitize("election 2024-11-05 results");
        assert_eq!(stem, "Election Results - (Nov 05 2024)");
    }

    #[test]
    fn test_invalid_date_left_alone() {
        // Date-shaped but not a calendar date
        let stem = sanitize("report 2024-13-99 draft");
        assert_eq!(stem, "Report 2024-13-99 Draft");
    }

    #[test_case("breaking_news_2024-03-05_10-15-00")]
    #[test_case("the rundown of the day")]
    #[test_case("a/b <testing> results?")]
    #[test_case("election 2024-11-05 results")]
    #[test_case("")]
    fn sanitize_is_idempotent(input: &str) {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_never_empty() {
        for input in ["", " ", "___", "<>", "*?"] {
            assert!(!sanitize(input).is_empty());
        }
    }
}
