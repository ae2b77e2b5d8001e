//! # Estimator Module - Reading Time Estimation
//!
//! This module provides the [`Estimator`], which turns a piece of content into a
//! reading time [`Estimate`].
//!
//! ## Estimation Pipeline
//!
#![doc = simple_mermaid::mermaid!("../diagrams/estimate_pipeline.mmd")]
//!
//! Every pass works on the cleaned content. Code blocks and images are charged a
//! flat rate, and the word-based time of their own words is taken back out, since
//! those words were already part of the base time.
//!
//! ## Usage Examples
//!
//! ```rust
//! use readtime::{Configuration, CustomComponent, Estimator};
//!
//! let estimator = Estimator::new(Configuration {
//!     custom_components: vec![CustomComponent::new("Quiz", 3.0)],
//!     ..Configuration::default()
//! })
//! .unwrap();
//!
//! let estimate = estimator.estimate("A short intro.\n\n<Quiz/>");
//! assert_eq!(estimate.words, 4);
//! assert_eq!(estimate.text, "4 min read");
//!
//! // See where the time went
//! let breakdown = estimator.breakdown("A short intro.\n\n<Quiz/>");
//! assert_eq!(breakdown.components, 3.0);
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{ConfigError, Configuration};
use crate::content::{clean_content, count_words};
use crate::passes::{self, ComponentMatcher};
use crate::{Minutes, minutes};

const READ_SUFFIX: &str = "min read";

/// Reading time estimator
///
/// Holds a validated [Configuration] and the tag patterns of its custom components.
/// Estimating never mutates the estimator, so a single instance can be shared
/// between threads.
#[derive(Debug, Default, Clone)]
pub struct Estimator {
    config: Configuration,
    components: Vec<ComponentMatcher>,
}

impl Estimator {
    /// Creates an estimator from `config`
    ///
    /// # Errors
    ///
    /// Returns a [ConfigError] if a setting is out of range, or if a custom
    /// component's name doesn't form a valid tag pattern.
    pub fn new(config: Configuration) -> Result<Self, ConfigError> {
        config.validate()?;

        let components = config
            .custom_components
            .iter()
            .map(ComponentMatcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { config, components })
    }

    /// The configuration used by this estimator
    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Estimates the reading time of `text`
    ///
    /// ```rust
    /// use readtime::Estimator;
    ///
    /// let estimate = Estimator::default().estimate("");
    /// assert_eq!(estimate.words, 0);
    /// assert_eq!(estimate.minutes, 0.0);
    /// assert_eq!(estimate.text, "0 min read");
    /// ```
    pub fn estimate(&self, text: &str) -> Estimate {
        self.breakdown(text).into()
    }

    /// Computes the contribution of every pass for `text`
    pub fn breakdown(&self, text: &str) -> Breakdown {
        let content = clean_content(text);
        let wpm = self.config.words_per_minute;

        let words = count_words(&content);
        let breakdown = Breakdown {
            words,
            base: minutes(words, wpm),
            explicit: passes::explicit_time(&content),
            components: passes::components(&content, &self.components),
            code_blocks: passes::code_blocks(&content, self.config.code_time_per_line, wpm),
            images: passes::images(&content, self.config.image_time, wpm),
        };

        debug!(?breakdown, "estimated reading time");
        breakdown
    }
}

/// Time contributed by each estimation pass, in minutes
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    /// Words in the cleaned content
    pub words: usize,
    /// Time to read all words at the configured speed
    pub base: Minutes,
    /// Time given by the first `readingTime="n"` attribute
    pub explicit: Minutes,
    /// Flat time for custom component tags
    pub components: Minutes,
    /// Flat time for code lines, net of the word time of the code blocks
    pub code_blocks: Minutes,
    /// Flat time for images, net of the word time of the image references
    pub images: Minutes,
}

impl Breakdown {
    /// Sum of all contributions
    pub fn total(&self) -> Minutes {
        self.base + (self.explicit + self.components + self.code_blocks + self.images)
    }
}

/// A reading time estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Human readable estimate, like `3 min read`
    pub text: String,
    /// Estimated minutes
    ///
    /// May be fractional, and even negative when the content carries a negative
    /// `readingTime` or a component is configured with a negative time.
    pub minutes: Minutes,
    /// Words in the cleaned content
    pub words: usize,
}

impl Estimate {
    /// Whole minutes shown in [Estimate::text]
    ///
    /// The minutes are rounded to two decimals, then rounded up. Negative values
    /// are kept as they are.
    pub fn displayed_minutes(&self) -> Minutes {
        displayed_minutes(self.minutes)
    }
}

impl From<Breakdown> for Estimate {
    fn from(breakdown: Breakdown) -> Self {
        let minutes = breakdown.total();
        Self {
            text: format!("{} {READ_SUFFIX}", displayed_minutes(minutes)),
            minutes,
            words: breakdown.words,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn displayed_minutes(minutes: Minutes) -> Minutes {
    // Two decimals first, so float noise like 2.0000001 doesn't round up a whole minute
    let rounded = format!("{minutes:.2}").parse::<Minutes>().unwrap_or(minutes);
    let whole = rounded.ceil();
    // -0.0 shows as 0
    if whole == 0.0 { 0.0 } else { whole }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomComponent;

    const WORDS_PER_MINUTE: f64 = 200.0;
    const IMAGE_TIME: Minutes = 2.0;
    const CODE_TIME_PER_LINE: Minutes = 1.0;
    const COMPONENT: &str = "TestComponent";
    const COMPONENT_TIME: Minutes = 3.0;

    fn estimator() -> Estimator {
        Estimator::new(Configuration {
            words_per_minute: WORDS_PER_MINUTE,
            image_time: IMAGE_TIME,
            code_time_per_line: CODE_TIME_PER_LINE,
            custom_components: vec![CustomComponent::new(COMPONENT, COMPONENT_TIME)],
        })
        .unwrap()
    }

    fn whole_minutes(text: &str) -> i64 {
        estimator().estimate(text).minutes as i64
    }

    #[test]
    fn test_plain_text() {
        let estimate = estimator().estimate("One two three");
        assert_eq!(estimate.minutes, 3.0 / WORDS_PER_MINUTE);
        assert_eq!(estimate.words, 3);
        assert_eq!(estimate.text, "1 min read");

        // Newlines count like spaces
        let estimate = estimator().estimate("One \n             two \n             three");
        assert_eq!(estimate.minutes, 3.0 / WORDS_PER_MINUTE);
    }

    #[test]
    fn test_empty_text() {
        for text in ["", "   \n\t  "] {
            let estimate = estimator().estimate(text);
            assert_eq!(estimate.minutes, 0.0);
            assert_eq!(estimate.words, 0);
            assert_eq!(estimate.text, "0 min read");
        }
    }

    #[test]
    fn test_longer_text() {
        let text = "word ".repeat(450);
        let estimate = estimator().estimate(&text);
        assert_eq!(estimate.words, 450);
        assert_eq!(estimate.minutes, 2.25);
        assert_eq!(estimate.text, "3 min read");
    }

    #[test]
    fn test_single_line_code_block() {
        let text = "```javascript \n                var foo = 3 + 7; \n            ```";
        assert_eq!(whole_minutes(text), CODE_TIME_PER_LINE as i64);
    }

    #[test]
    fn test_multi_line_code_block() {
        let text = "```javascript \n                var foo = 3; \n                var bar = 7; \n                var foobar = foo + bar; \n            ```";
        assert_eq!(whole_minutes(text), (CODE_TIME_PER_LINE * 3.0) as i64);
    }

    #[test]
    fn test_multiple_code_blocks() {
        let text = "```javascript \n                var foo = 3; \n                var bar = 7; \n                var foobar = foo + bar; \n            ``` \n            ``` \n                var foo = 3; \n                var bar = 7; \n                var foobar = foo + bar; \n            ```";
        assert_eq!(whole_minutes(text), (CODE_TIME_PER_LINE * 3.0 * 2.0) as i64);
    }

    #[test]
    fn test_code_block_replaces_word_time() {
        // The block's words are charged at the code rate only
        let text = "Intro words here\n```\nlet total = a + b;\n```";
        let breakdown = estimator().breakdown(text);
        assert_eq!(breakdown.words, 7);
        assert_eq!(breakdown.code_blocks, 1.0 - 4.0 / WORDS_PER_MINUTE);
        assert!((breakdown.total() - (1.0 + 3.0 / WORDS_PER_MINUTE)).abs() < 1e-12);
    }

    #[test]
    fn test_single_image() {
        assert_eq!(whole_minutes("![Alt](images/test.png)"), IMAGE_TIME as i64);
    }

    #[test]
    fn test_multiple_images() {
        let text = "![Alt1](images/test1.png) \n                ![Alt2](images/test2.png) \n                ![Alt3](images/test3.png)";
        assert_eq!(estimator().estimate(text).minutes, IMAGE_TIME * 3.0);
    }

    #[test]
    fn test_custom_component() {
        assert_eq!(whole_minutes(&format!("<{COMPONENT}/>")), COMPONENT_TIME as i64);
    }

    #[test]
    fn test_multiple_custom_components() {
        let text = format!(
            "<{COMPONENT}/>\n                <{COMPONENT}></{COMPONENT}>\n                <{COMPONENT}> foo </{COMPONENT}> "
        );
        assert_eq!(whole_minutes(&text), (COMPONENT_TIME * 3.0) as i64);
    }

    #[test]
    fn test_closing_component_tag() {
        assert_eq!(whole_minutes(&format!("</{COMPONENT}>")), 0);
    }

    #[test]
    fn test_explicit_time() {
        assert_eq!(
            whole_minutes(r#"<MyComponent prop1="test" readingTime="5"/>"#),
            5
        );
    }

    #[test]
    fn test_explicit_time_other_attribute() {
        assert_eq!(
            whole_minutes(r#"<MyComponent prop1="test" readingTimes="5"/>"#),
            0
        );
    }

    #[test]
    fn test_explicit_time_first_wins() {
        assert_eq!(
            whole_minutes(r#"<MyComponent prop1="test" readingTime="5" readingTime="20"/>"#),
            5
        );
    }

    #[test]
    fn test_comments_are_ignored() {
        let text = format!(
            "One two three\n<!--\n![Alt](hidden.png)\n<{COMPONENT}/>\nreadingTime=\"9\"\n```\ncode\n```\n-->"
        );
        let breakdown = estimator().breakdown(&text);
        assert_eq!(
            breakdown,
            Breakdown {
                words: 3,
                base: 3.0 / WORDS_PER_MINUTE,
                ..Breakdown::default()
            }
        );
    }

    #[test]
    fn test_breakdown_matches_estimate() {
        let text = format!(
            "# Title\n\nSome prose.\n\n![Diagram](d.png)\n\n```rust\nfn main() {{}}\n```\n\n<{COMPONENT} readingTime=\"2\"/>"
        );
        let estimator = estimator();
        let breakdown = estimator.breakdown(&text);
        let estimate = estimator.estimate(&text);

        assert_eq!(breakdown.total(), estimate.minutes);
        assert_eq!(breakdown.words, estimate.words);
        assert_eq!(breakdown.explicit, 2.0);
        assert_eq!(breakdown.components, COMPONENT_TIME);
    }

    #[test]
    fn test_negative_minutes_are_kept() {
        let slow = Estimator::new(Configuration {
            words_per_minute: 1.0,
            code_time_per_line: 0.0,
            ..Configuration::default()
        })
        .unwrap();

        // Code words are taken back out of the base time
        let breakdown = slow.breakdown("```\na b c\n```");
        assert_eq!(breakdown.base, 3.0);
        assert_eq!(breakdown.code_blocks, -3.0);
        assert_eq!(breakdown.total(), 0.0);

        // An explicit negative time pushes the estimate below zero
        let estimate = estimator().estimate(r#"<A readingTime="-2"/>"#);
        assert_eq!(estimate.minutes, 3.0 / WORDS_PER_MINUTE - 2.0);
        assert_eq!(estimate.displayed_minutes(), -1.0);
        assert_eq!(estimate.text, "-1 min read");
    }

    #[test]
    fn test_huge_explicit_time() {
        let estimate = estimator().estimate(r#"<A readingTime="100000000000000000000"/>"#);
        assert_eq!(estimate.displayed_minutes(), 1e20);
        assert_eq!(estimate.text, "100000000000000000000 min read");
    }

    #[test]
    fn test_default_estimator() {
        let estimator = Estimator::default();
        assert_eq!(estimator.configuration(), &Configuration::default());
        assert_eq!(estimator.estimate("One two three").text, "1 min read");
        assert_eq!(estimator.estimate("<Quiz/>").minutes, 1.0 / 200.0);
    }

    #[test]
    fn test_displayed_minutes() {
        assert_eq!(displayed_minutes(0.0), 0.0);
        assert_eq!(displayed_minutes(0.015), 1.0);
        assert_eq!(displayed_minutes(1.0), 1.0);
        assert_eq!(displayed_minutes(1.004), 1.0);
        assert_eq!(displayed_minutes(1.006), 2.0);
        assert_eq!(displayed_minutes(2.25), 3.0);
        assert_eq!(displayed_minutes(-1.5), -1.0);

        // Negative zero is shown as 0
        assert!(displayed_minutes(-0.3).is_sign_positive());
        let breakdown = Breakdown {
            explicit: -0.3,
            ..Breakdown::default()
        };
        assert_eq!(Estimate::from(breakdown).text, "0 min read");
    }

    #[test]
    fn test_invalid_configuration() {
        let result = Estimator::new(Configuration {
            custom_components: vec![CustomComponent::new("[", 1.0)],
            ..Configuration::default()
        });
        assert!(matches!(result, Err(ConfigError::ComponentPattern { .. })));

        let result = Estimator::new(Configuration {
            words_per_minute: 0.0,
            ..Configuration::default()
        });
        assert!(matches!(result, Err(ConfigError::InvalidWordsPerMinute(_))));
    }

    #[test]
    fn test_estimator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Estimator>();

        let estimator = std::sync::Arc::new(estimator());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let estimator = estimator.clone();
                std::thread::spawn(move || estimator.estimate("One two three").minutes)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3.0 / WORDS_PER_MINUTE);
        }
    }
}
