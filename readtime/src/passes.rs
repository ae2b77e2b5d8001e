use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::{ConfigError, CustomComponent};
use crate::content::{count_code_lines, count_words};
use crate::{Minutes, minutes};

// Author-provided reading time, e.g. `<Video readingTime="4"/>`
static RE_EXPLICIT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"readingTime="([^\n\r\x{2028}\x{2029}]*?)""#)
        .expect("valid explicit reading time regex")
});
static RE_CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code block regex"));
// Neither part of an image crosses a line break, `\r` and U+2028/U+2029 included
static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\n\r\x{2028}\x{2029}]*?\]\([^\n\r\x{2028}\x{2029}]*?\)")
        .expect("valid image regex")
});

/// Opening-tag matcher for a configured [CustomComponent]
#[derive(Debug, Clone)]
pub(crate) struct ComponentMatcher {
    pattern: Regex,
    time: Minutes,
}

impl ComponentMatcher {
    pub(crate) fn compile(component: &CustomComponent) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&format!("<{}( |/|>)", component.name)).map_err(|source| {
            ConfigError::ComponentPattern {
                name: component.name.clone(),
                source,
            }
        })?;

        Ok(Self {
            pattern,
            time: component.time,
        })
    }

    fn occurrences(&self, content: &str) -> usize {
        self.pattern.find_iter(content).count()
    }
}

/// Minutes from the first `readingTime="n"` attribute in `content`
pub(crate) fn explicit_time(content: &str) -> Minutes {
    RE_EXPLICIT_TIME
        .captures(content)
        .and_then(|captures| captures.get(1))
        .and_then(|value| parse_leading_integer(value.as_str()))
        .unwrap_or(0.0)
}

/// Parses the integer at the start of `value`
///
/// Leading whitespace and a single sign are accepted, and a `0x` or `0X` prefix
/// switches to hexadecimal. Anything after the digits is ignored. Returns `None`
/// when there are no digits.
fn parse_leading_integer(value: &str) -> Option<Minutes> {
    let value = value.trim_start();
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, unsigned) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let digits = unsigned
        .chars()
        .map_while(|c| c.to_digit(radix))
        .map(Minutes::from)
        .collect::<Vec<_>>();

    if digits.is_empty() {
        return None;
    }

    let base = Minutes::from(radix);
    let magnitude = digits.into_iter().fold(0.0, |acc, digit| acc * base + digit);
    Some(if negative { -magnitude } else { magnitude })
}

/// Flat time for every opening tag of every configured component
pub(crate) fn components(content: &str, matchers: &[ComponentMatcher]) -> Minutes {
    matchers.iter().fold(0.0, |total, matcher| {
        let count = matcher.occurrences(content);
        trace!(pattern = matcher.pattern.as_str(), count, "custom components");
        total + matcher.time * count as Minutes
    })
}

/// Flat time per code line, minus the word time already charged for each block
pub(crate) fn code_blocks(content: &str, time_per_line: Minutes, words_per_minute: f64) -> Minutes {
    RE_CODE_BLOCK
        .find_iter(content)
        .fold(0.0, |mut total, block| {
            let lines = count_code_lines(block.as_str());
            let words = count_words(block.as_str());
            trace!(start = block.start(), lines, words, "code block");

            total += lines as Minutes * time_per_line;
            total -= minutes(words, words_per_minute);
            total
        })
}

/// Flat time per image, minus the word time already charged for each reference
pub(crate) fn images(content: &str, image_time: Minutes, words_per_minute: f64) -> Minutes {
    RE_IMAGE.find_iter(content).fold(0.0, |mut total, image| {
        let words = count_words(image.as_str());
        trace!(start = image.start(), words, "image");

        total += image_time;
        total -= minutes(words, words_per_minute);
        total
    })
}
