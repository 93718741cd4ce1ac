//! Processors are the workers of a [`Typus`](crate::Typus).
//!
//! A typus keeps its processors in an ordered list. Running the list is a
//! chain of responsibility: every processor gets the text plus a [`Chain`]
//! holding the processors after it, does its work and hands the text on by
//! calling [`Chain::run`]. The first processor therefore wraps the second,
//! which wraps the third, down to an identity tail returning the text as is.
//!
//! | Stage                       | Processor                                   |
//! |-----------------------------|---------------------------------------------|
//! | [`Stage::EscapePhrases`]    | [`escapes::Escape`] with [`escapes::Phrases`] |
//! | [`Stage::EscapeHtml`]       | [`escapes::Escape`] with [`escapes::Html`]  |
//! | [`Stage::Quotes`]           | [`quotes::QuotesProcessor`]                 |
//! | [`Stage::Expressions`]      | [`expressions::ExpressionsProcessor`]       |

pub mod escapes;
pub mod expressions;
pub mod quotes;
pub mod rules;

use crate::error::ConfigError;
use crate::typus::{Config, Options};

use escapes::{Escape, Html, Phrases};
use expressions::ExpressionsProcessor;
use quotes::QuotesProcessor;

/// A single step of the pipeline.
pub trait Processor: Send + Sync {
    /// Process `text` and pass it to `next`.
    ///
    /// A processor may skip calling `next` only when it knows the rest of the
    /// work is unnecessary.
    fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String;
}

/// The processors left to run after the current one.
#[derive(Clone, Copy)]
pub struct Chain<'a> {
    processors: &'a [Box<dyn Processor>],
}

impl<'a> Chain<'a> {
    pub fn new(processors: &'a [Box<dyn Processor>]) -> Self {
        Chain { processors }
    }

    /// Run the remaining processors. An exhausted chain returns `text` unchanged.
    pub fn run(self, text: String, options: &Options) -> String {
        match self.processors.split_first() {
            Some((head, rest)) => head.run(text, options, Chain { processors: rest }),
            None => text,
        }
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Observes optional work done by processors.
///
/// Escape processors skip restoring when nothing was escaped, and the quotes
/// processor skips the nesting switch for flat quoting. A probe lets callers
/// see whether those steps ran.
pub trait Probe: Send + Sync {
    /// An escape processor put `records` escaped spans of `kind` back.
    fn restored(&self, _kind: &str, _records: usize) {}

    /// The quotes processor switched nested quotes after `passes` passes.
    fn nesting_switched(&self, _passes: usize) {}
}

/// Built-in processors, in the order they're usually chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EscapePhrases,
    EscapeHtml,
    Quotes,
    Expressions,
}

impl Stage {
    pub(crate) fn build(self, config: &Config) -> Result<Box<dyn Processor>, ConfigError> {
        let processor: Box<dyn Processor> = match self {
            Stage::EscapePhrases => Box::new(Escape::new(Phrases).with_probe(config.probe.clone())),
            Stage::EscapeHtml => Box::new(Escape::new(Html::new()?).with_probe(config.probe.clone())),
            Stage::Quotes => {
                let quotes = config.quotes.ok_or(ConfigError::MissingQuotes)?;
                Box::new(
                    QuotesProcessor::new(quotes)?
                        .with_max_depth(config.max_quote_depth)
                        .with_probe(config.probe.clone()),
                )
            }
            Stage::Expressions => Box::new(ExpressionsProcessor::new(
                &config.expressions,
                &config.tables,
                &config.definitions,
            )?),
        };
        Ok(processor)
    }
}
