use std::fmt::Write;

use clap::ValueEnum;
use readtime::{Breakdown, Estimate};
use serde::Serialize;

use crate::error::AppError;
use crate::input::Source;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// One JSON object per input
    Json,
}

/// How reports are rendered
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Prefix text reports with the input name
    pub labelled: bool,
    /// Show the contribution of every pass in text reports
    pub breakdown: bool,
}

/// The estimate of a single input
#[derive(Debug, Serialize)]
pub struct Report {
    pub source: String,
    #[serde(flatten)]
    pub estimate: Estimate,
    pub breakdown: Breakdown,
}

impl Report {
    pub fn new(source: &Source, breakdown: Breakdown) -> Self {
        Self {
            source: source.to_string(),
            estimate: breakdown.into(),
            breakdown,
        }
    }

    pub fn render(&self, options: RenderOptions) -> Result<String, AppError> {
        match options.format {
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
            OutputFormat::Text => Ok(self.render_text(options)),
        }
    }

    fn render_text(&self, options: RenderOptions) -> String {
        let mut text = String::new();

        if options.labelled {
            let _ = write!(text, "{}: ", self.source);
        }
        text.push_str(&self.estimate.text);

        if options.breakdown {
            let breakdown = &self.breakdown;
            let _ = write!(
                text,
                " ({} words, {:.2} min)",
                self.estimate.words, self.estimate.minutes
            );
            for (label, minutes) in [
                ("words", breakdown.base),
                ("explicit", breakdown.explicit),
                ("components", breakdown.components),
                ("code blocks", breakdown.code_blocks),
                ("images", breakdown.images),
            ] {
                let _ = write!(text, "\n  {label:<12}{minutes:>8.2}");
            }
        }

        text
    }
}
