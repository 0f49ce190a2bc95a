//! Parsing of human-readable download magnitudes.
//!
//! Magnitudes such as `"1.2M"` or `"500K+"` are reduced to a bare number by
//! dropping every character that is not an ASCII digit or a decimal point.
//! Unit suffixes are **ignored, not applied**: `"1.2M"` yields `1.2` and
//! `"500K"` yields `500.0`, so `"500K"` outranks `"1.2M"`. Feed ordering
//! depends on these unscaled values; scaling by suffix is a product decision,
//! not a parser fix.

/// Parses a magnitude string into its unscaled numeric value.
///
/// After stripping, the longest prefix that forms a valid decimal number is
/// used (`"1.2.3"` → `1.2`). Returns `None` when no digits remain.
#[must_use]
pub fn parse_download_count(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (idx, ch) in stripped.char_indices() {
        if ch == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    stripped[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn test_suffix_is_ignored_not_multiplied() {
        assert!(approx(parse_download_count("1.2M"), 1.2));
        assert!(approx(parse_download_count("500K"), 500.0));
        assert!(approx(parse_download_count("10M+"), 10.0));
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        assert!(approx(parse_download_count("1,500,000"), 1_500_000.0));
    }

    #[test]
    fn test_second_decimal_point_ends_the_number() {
        assert!(approx(parse_download_count("1.2.3"), 1.2));
    }

    #[test]
    fn test_leading_dot_and_trailing_dot() {
        assert!(approx(parse_download_count(".5K"), 0.5));
        assert!(approx(parse_download_count("7."), 7.0));
    }

    #[test]
    fn test_no_digits_is_none() {
        assert_eq!(parse_download_count(""), None);
        assert_eq!(parse_download_count("many"), None);
        assert_eq!(parse_download_count("."), None);
    }
}
