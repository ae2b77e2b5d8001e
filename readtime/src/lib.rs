//! # readtime
//!
//! Estimates how long a person takes to read a piece of Markdown-like content:
//! prose, fenced code blocks, images and embedded custom components.
//!
//! ```rust
//! use readtime::{Configuration, Estimator};
//!
//! let estimator = Estimator::new(Configuration::default()).unwrap();
//! let estimate = estimator.estimate("One two three");
//!
//! assert_eq!(estimate.words, 3);
//! assert_eq!(estimate.text, "1 min read");
//! ```

pub mod config;
pub mod content;
pub mod estimator;
mod passes;

pub use config::{ConfigError, Configuration, CustomComponent};
pub use content::{clean_content, count_code_lines, count_words};
pub use estimator::{Breakdown, Estimate, Estimator};

/// Amount of time, in (possibly fractional) minutes
pub type Minutes = f64;

// Time it takes to read `words` words at the given speed
pub(crate) fn minutes(words: usize, words_per_minute: f64) -> Minutes {
    words as Minutes / words_per_minute
}
