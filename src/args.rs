// SPDX-License-Identifier: MPL-2.0
//! Positional argument substitution for parameterized UI strings.
//!
//! Translated strings keep the `%1`, `%2`, ... markers of their source text
//! (`"Choose City (%1/%2)"` becomes `"Ort wählen (%1/%2)"`), so the caller
//! fills them after lookup, the way `QString::arg` chains do.

use std::fmt::Display;

/// Replaces `%1`..`%99` in `template` with the matching argument.
///
/// Markers without an argument are left untouched and a `%` not followed
/// by a digit is literal text.
///
/// # Example
///
/// ```
/// use monav_l10n::args::fill;
///
/// assert_eq!(fill("Ort wählen (%1/%2)", &[&3, &12]), "Ort wählen (3/12)");
/// assert_eq!(fill("100% %3", &[&"a"]), "100% %3");
/// ```
#[must_use]
pub fn fill(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(position) = rest.find('%') {
        out.push_str(&rest[..position]);
        let after = &rest[position + 1..];
        match marker(after, args.len()) {
            Some((index, digits)) => {
                out.push_str(&args[index - 1].to_string());
                rest = &after[digits..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Replaces `%n` with the count of a plural message.
#[must_use]
pub fn fill_count(template: &str, n: i64) -> String {
    template.replace("%n", &n.to_string())
}

/// Parses the number after a `%`, preferring two digits when that argument
/// exists. Returns the 1-based argument index and the digits consumed.
fn marker(after: &str, available: usize) -> Option<(usize, usize)> {
    let bytes = after.as_bytes();
    let first = bytes.first().filter(|b| b.is_ascii_digit())?;
    let one = usize::from(first - b'0');

    if let Some(second) = bytes.get(1).filter(|b| b.is_ascii_digit()) {
        let two = one * 10 + usize::from(second - b'0');
        if (1..=available).contains(&two) {
            return Some((two, 2));
        }
    }

    (1..=available).contains(&one).then_some((one, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_in_order_of_marker_numbers() {
        assert_eq!(fill("%2 of %1", &[&"a", &"b"]), "b of a");
    }

    #[test]
    fn leaves_unmatched_markers() {
        assert_eq!(fill("%1 and %2", &[&"x"]), "x and %2");
        assert_eq!(fill("%0", &[&"x"]), "%0");
    }

    #[test]
    fn multiline_message_with_two_arguments() {
        let text = fill(
            "Cannot write to file %1:\n%2",
            &[&"speed.spp", &"Permission denied"],
        );
        assert_eq!(text, "Cannot write to file speed.spp:\nPermission denied");
    }

    #[test]
    fn two_digit_markers_need_enough_arguments() {
        let args: Vec<String> = (1..=10).map(|i| format!("a{i}")).collect();
        let refs: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
        assert_eq!(fill("%10", &refs), "a10");
        assert_eq!(fill("%10", &refs[..1]), "a10");
        assert_eq!(fill("%12", &refs[..2]), "a12");
    }

    #[test]
    fn trailing_percent_is_literal() {
        assert_eq!(fill("50%", &[&1]), "50%");
    }

    #[test]
    fn count_substitution() {
        assert_eq!(fill_count("%n Pakete", 3), "3 Pakete");
    }
}
