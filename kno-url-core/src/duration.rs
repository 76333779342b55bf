// Free-form duration tokens: "90", "90s", "2m", "1h15m30s", "1h 15m 30s" (once joined)

use crate::error::{CoreError, Result};

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Parse a duration token into whole seconds.
///
/// A bare run of digits is taken as seconds. Anything else is scanned for
/// `<digits><unit>` fragments where the unit is `h`, `m`, `s` or missing
/// (seconds). Characters that are not part of a fragment are skipped, so
/// `"abc1h"` is accepted as one hour. In the fragment form a total of zero
/// or no fragments at all is rejected; overflow is rejected in both forms.
pub fn parse_duration(input: &str) -> Result<u64> {
    let normalized = input.trim().to_lowercase();
    let malformed = || CoreError::MalformedDuration(input.to_string());

    if normalized.is_empty() {
        return Err(malformed());
    }

    if normalized.chars().all(|c| c.is_ascii_digit()) {
        return normalized.parse::<u64>().map_err(|_| malformed());
    }

    let mut total: u64 = 0;
    let mut matched = false;
    let mut rest = normalized.as_str();

    while let Some((fragment, remaining)) = next_fragment(rest) {
        let (count, unit) = fragment;
        let fragment_seconds = count
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(unit))
            .ok_or_else(malformed)?;
        total = total.checked_add(fragment_seconds).ok_or_else(malformed)?;
        matched = true;
        rest = remaining;
    }

    if !matched || total == 0 {
        return Err(malformed());
    }

    Ok(total)
}

/// Find the next `<digits><unit?>` fragment, returning the digits, the unit
/// multiplier and the unconsumed tail.
fn next_fragment(input: &str) -> Option<((&str, u64), &str)> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let from_digits = &input[start..];
    let digits_len = from_digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(from_digits.len());
    let (digits, tail) = from_digits.split_at(digits_len);

    let (multiplier, consumed) = match tail.chars().next() {
        Some('h') => (SECONDS_PER_HOUR, 1),
        Some('m') => (SECONDS_PER_MINUTE, 1),
        Some('s') => (1, 1),
        _ => (1, 0),
    };

    Some(((digits, multiplier), &tail[consumed..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_duration("30").unwrap(), 30);
        assert_eq!(parse_duration(" 0090 ").unwrap(), 90);
        assert_eq!(parse_duration("0").unwrap(), 0);
    }

    #[test]
    fn parses_unit_fragments() {
        assert_eq!(parse_duration("90s").unwrap(), 90);
        assert_eq!(parse_duration("2m").unwrap(), 120);
        assert_eq!(parse_duration("1m30s").unwrap(), 90);
        assert_eq!(parse_duration("1h15m30s").unwrap(), 4530);
        assert_eq!(parse_duration("1H").unwrap(), 3600);
    }

    #[test]
    fn unit_less_fragment_counts_as_seconds() {
        assert_eq!(parse_duration("1m5").unwrap(), 65);
    }

    #[test]
    fn skips_unmatched_characters() {
        assert_eq!(parse_duration("abc1h").unwrap(), 3600);
        assert_eq!(parse_duration("1h, 2m").unwrap(), 3720);
        assert_eq!(parse_duration("1hh").unwrap(), 3600);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            parse_duration(""),
            Err(CoreError::MalformedDuration(_))
        ));
        assert!(parse_duration("   ").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("0h0m").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_duration("99999999999999999999").is_err());
        assert!(parse_duration("9999999999999999h").is_err());
    }
}
