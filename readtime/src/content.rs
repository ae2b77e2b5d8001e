//! Content cleanup and counting primitives shared by every estimation pass.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Delimiter of fenced code blocks
pub const CODE_FENCE: &str = "```";

// Markup comments, possibly spanning multiple lines
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

// Ideographs that never count as words
static RE_IGNORED_IDEOGRAPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4E00}-\x{9FA5}]").expect("valid ideograph regex"));

// Latin, Greek and Cyrillic runs | East Asian, Hangul and Kana runs | Nordic letters | ASCII words
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[a-zA-Z0-9_\x{0392}-\x{03C9}\x{0400}-\x{04FF}]+",
        r"|[\x{4E00}-\x{9FFF}\x{3400}-\x{4DBF}\x{F900}-\x{FAFF}\x{3040}-\x{309F}\x{AC00}-\x{D7AF}\x{0400}-\x{04FF}]+",
        r"|[\x{00E4}\x{00C4}\x{00E5}\x{00C5}\x{00F6}\x{00D6}]+",
        r"|[A-Za-z0-9_]+",
    ))
    .expect("valid word regex")
});

/// Removes markup comments (`<!-- ... -->`) from `text`
///
/// Everything else is left in place, including code blocks and images.
pub fn clean_content(text: &str) -> Cow<'_, str> {
    RE_COMMENT.replace_all(text, "")
}

/// Counts the words in `text`
///
/// Runs of Latin, Greek, Cyrillic, Hangul and Kana characters each count as a
/// single word. Ideographs in U+4E00..=U+9FA5 are dropped before counting and
/// contribute nothing.
///
/// ```rust
/// use readtime::count_words;
///
/// assert_eq!(count_words("Hello, world"), 2);
/// assert_eq!(count_words("Hello, wörld"), 4);
/// assert_eq!(count_words("Привет мир"), 2);
/// assert_eq!(count_words(""), 0);
/// ```
pub fn count_words(text: &str) -> usize {
    let text = RE_IGNORED_IDEOGRAPHS.replace_all(text, "");
    RE_WORD.find_iter(&text).count()
}

/// Counts the lines of a fenced code block that are charged as code
///
/// Empty lines and lines holding a fence are skipped. Lines with only
/// whitespace are still counted.
pub fn count_code_lines(block: &str) -> usize {
    block
        .split('\n')
        .filter(|line| !line.is_empty() && !line.contains(CODE_FENCE))
        .count()
}
