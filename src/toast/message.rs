use std::sync::LazyLock;

use regex::Regex;

pub const ELLIPSIS: &str = "...";

static MARKUP_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Drop every `<...>` tag, keeping the text between them.
#[must_use]
pub fn strip_markup(message: &str) -> String {
    match MARKUP_TAG.as_ref() {
        Some(re) => re.replace_all(message, "").into_owned(),
        None => message.to_string(),
    }
}

/// Fit `message` into `max_len` visible characters.
///
/// Length is measured on the markup-stripped text. A message that fits is
/// returned verbatim, markup included. A message that does not fit comes back
/// as plain text cut to `max_len - 3` characters followed by `...`, so its
/// markup is lost.
#[must_use]
pub fn trim_message(message: &str, max_len: usize) -> String {
    if message.is_empty() {
        return String::new();
    }

    let text = strip_markup(message);
    if text.chars().count() <= max_len {
        return message.to_string();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut trimmed: String = text.chars().take(keep).collect();
    trimmed.push_str(ELLIPSIS);
    trimmed
}

#[cfg(test)]
mod tests {
    use super::{strip_markup, trim_message};

    #[test]
    fn short_message_is_untouched() {
        assert_eq!(trim_message("Saved", 80), "Saved");
        assert_eq!(trim_message("", 80), "");
    }

    #[test]
    fn long_message_is_cut_to_limit() {
        let trimmed = trim_message(&"x".repeat(100), 80);
        assert_eq!(trimmed.chars().count(), 80);
        assert!(trimmed.ends_with("..."));
        assert_eq!(&trimmed[..77], "x".repeat(77));
    }

    #[test]
    fn exact_limit_is_not_truncated() {
        let message = "y".repeat(80);
        assert_eq!(trim_message(&message, 80), message);
    }

    #[test]
    fn markup_does_not_count_towards_length() {
        let message = format!("<b>{}</b>", "z".repeat(78));
        assert_eq!(trim_message(&message, 80), message);
    }

    #[test]
    fn truncation_discards_markup() {
        let message = format!("<em>{}</em> tail", "a".repeat(90));
        let trimmed = trim_message(&message, 80);
        assert!(!trimmed.contains('<'));
        assert_eq!(trimmed.chars().count(), 80);
        assert_eq!(strip_markup(&trimmed), trimmed);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let message = "é".repeat(80);
        assert_eq!(trim_message(&message, 80), message);
        let trimmed = trim_message(&"é".repeat(81), 80);
        assert_eq!(trimmed.chars().count(), 80);
    }

    #[test]
    fn tiny_limits_saturate() {
        assert_eq!(trim_message("abcdef", 2), "...");
    }

    #[test]
    fn stray_angle_bracket_survives() {
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("<p>hi</p>"), "hi");
    }
}
