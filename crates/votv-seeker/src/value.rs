//! Interpreting formatted cell text.
//!
//! Cells reach the matcher as display strings. This module turns them back
//! into numbers or intervals where a filter needs it, and compares text
//! case-insensitively otherwise.

use std::cmp::Ordering;

/// Parses a finite number from cell or operand text.
///
/// Surrounding whitespace is ignored. Blank text, `NaN` and infinities are
/// not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compares two strings ignoring case.
pub fn compare_lexical(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

/// A closed numeric interval decoded from an interval column's cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Creates an interval, swapping the bounds if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { lower: a, upper: b }
        } else {
            Interval { lower: b, upper: a }
        }
    }

    /// Decodes `"lower upper"`, `"lower, upper"` or `"[lower upper]"`.
    ///
    /// Exactly two finite numbers are required.
    pub fn parse(text: &str) -> Option<Interval> {
        let inner = text
            .trim()
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')']);

        let mut parts = inner
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty());

        let lower = parse_number(parts.next()?)?;
        let upper = parse_number(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        Some(Interval::new(lower, upper))
    }

    /// Returns `true` if this interval shares at least one point with the
    /// range `[low, high]`, where `None` leaves that side unbounded.
    pub fn overlaps(&self, low: Option<f64>, high: Option<f64>) -> bool {
        low.map_or(true, |low| self.upper >= low) && high.map_or(true, |high| self.lower <= high)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -1.5e3 "), Some(-1500.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn lexical() {
        assert_eq!(compare_lexical("Alpha", "alpha"), Ordering::Equal);
        assert_eq!(compare_lexical("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_lexical("zeta", "Alpha"), Ordering::Greater);
    }

    #[test]
    fn interval_parsing() {
        assert_eq!(Interval::parse("1 2"), Some(Interval::new(1.0, 2.0)));
        assert_eq!(Interval::parse("1.5, 2.5"), Some(Interval::new(1.5, 2.5)));
        assert_eq!(Interval::parse("[3 4]"), Some(Interval::new(3.0, 4.0)));
        assert_eq!(Interval::parse("5 4"), Some(Interval::new(4.0, 5.0)));
        assert_eq!(Interval::parse("1"), None);
        assert_eq!(Interval::parse("1 2 3"), None);
        assert_eq!(Interval::parse("a b"), None);
        assert_eq!(Interval::parse(""), None);
    }

    #[test]
    fn interval_overlap() {
        let interval = Interval::new(2.0, 4.0);
        assert!(interval.overlaps(Some(3.0), Some(10.0)));
        assert!(interval.overlaps(Some(4.0), None));
        assert!(interval.overlaps(None, Some(2.0)));
        assert!(interval.overlaps(None, None));
        assert!(!interval.overlaps(Some(4.5), Some(6.0)));
        assert!(!interval.overlaps(None, Some(1.0)));
        assert!(interval.contains(3.0));
        assert!(!interval.contains(5.0));
    }
}
