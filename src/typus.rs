//! The [`Typus`] facade and its builder.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::chars::{NBSP, NNBSP};
use crate::error::ConfigError;
use crate::processors::expressions::Producer;
use crate::processors::quotes::{DEFAULT_MAX_DEPTH, Quotes};
use crate::processors::rules::{DEFAULT_EXPRESSIONS, Tables};
use crate::processors::{Chain, Probe, Processor, Stage};

/// Shown in place of non-breaking spaces in debug mode.
pub const DEBUG_MARKER: &str = "_";

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Replace non-breaking spaces with [`DEBUG_MARKER`] in the result.
    pub debug: bool,
    /// Literal phrases left exactly as they are. Blank ones are ignored.
    pub escape_phrases: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn escape_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.escape_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }
}

/// Language presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ru,
}

impl Locale {
    pub fn quotes(self) -> Quotes {
        match self {
            Locale::En => Quotes::EN,
            Locale::Ru => Quotes::RU,
        }
    }

    /// A builder with every built-in stage and this locale's quotes.
    pub fn builder(self) -> TypusBuilder {
        Typus::builder()
            .stages([
                Stage::EscapePhrases,
                Stage::EscapeHtml,
                Stage::Quotes,
                Stage::Expressions,
            ])
            .quotes(self.quotes())
    }
}

/// Settings the built-in stages are built from.
pub(crate) struct Config {
    pub(crate) quotes: Option<Quotes>,
    pub(crate) expressions: Vec<String>,
    pub(crate) tables: Tables,
    pub(crate) definitions: HashMap<String, Producer>,
    pub(crate) max_quote_depth: usize,
    pub(crate) probe: Option<Arc<dyn Probe>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quotes: None,
            expressions: DEFAULT_EXPRESSIONS.iter().map(|name| name.to_string()).collect(),
            tables: Tables::default(),
            definitions: HashMap::new(),
            max_quote_depth: DEFAULT_MAX_DEPTH,
            probe: None,
        }
    }
}

enum Step {
    Builtin(Stage),
    Custom(Box<dyn Processor>),
}

/// Assembles a [`Typus`].
///
/// Stages run in the order they were added. Nothing is compiled until
/// [`build`](TypusBuilder::build), which is also where every configuration
/// error shows up.
#[derive(Default)]
pub struct TypusBuilder {
    steps: Vec<Step>,
    config: Config,
}

impl TypusBuilder {
    pub fn stage(mut self, stage: Stage) -> Self {
        self.steps.push(Step::Builtin(stage));
        self
    }

    pub fn stages(self, stages: impl IntoIterator<Item = Stage>) -> Self {
        stages.into_iter().fold(self, TypusBuilder::stage)
    }

    /// Append a processor of your own.
    pub fn processor(mut self, processor: impl Processor + 'static) -> Self {
        self.steps.push(Step::Custom(Box::new(processor)));
        self
    }

    pub fn quotes(mut self, quotes: Quotes) -> Self {
        self.config.quotes = Some(quotes);
        self
    }

    /// Rule sets run by [`Stage::Expressions`], replacing the default list.
    pub fn expressions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.expressions = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn tables(mut self, tables: Tables) -> Self {
        self.config.tables = tables;
        self
    }

    /// Register a rule set under `name`. It takes precedence over a built-in
    /// rule set of the same name.
    pub fn define_expression(mut self, name: impl Into<String>, producer: Producer) -> Self {
        self.config.definitions.insert(name.into(), producer);
        self
    }

    pub fn max_quote_depth(mut self, depth: usize) -> Self {
        self.config.max_quote_depth = depth;
        self
    }

    pub fn probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.config.probe = Some(probe);
        self
    }

    pub fn build(self) -> Result<Typus, ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::NoProcessors);
        }

        let config = self.config;
        let processors = self
            .steps
            .into_iter()
            .map(|step| match step {
                Step::Builtin(stage) => stage.build(&config),
                Step::Custom(processor) => Ok(processor),
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("built typus with {} processor(s)", processors.len());
        Ok(Typus {
            processors,
            quotes: config.quotes,
        })
    }
}

/// Typographic text processor.
///
/// ```
/// use typus::Typus;
///
/// let typus = Typus::ru().unwrap();
/// assert_eq!(typus.process("\"Цитата\""), "«Цитата»");
/// ```
///
/// A `Typus` is immutable once built and can be shared between threads.
pub struct Typus {
    processors: Vec<Box<dyn Processor>>,
    quotes: Option<Quotes>,
}

impl Typus {
    pub fn builder() -> TypusBuilder {
        TypusBuilder::default()
    }

    pub fn for_locale(locale: Locale) -> Result<Self, ConfigError> {
        locale.builder().build()
    }

    pub fn en() -> Result<Self, ConfigError> {
        Typus::for_locale(Locale::En)
    }

    pub fn ru() -> Result<Self, ConfigError> {
        Typus::for_locale(Locale::Ru)
    }

    pub fn quotes(&self) -> Option<Quotes> {
        self.quotes
    }

    pub fn process(&self, text: &str) -> String {
        self.process_with(text, &Options::default())
    }

    /// Process `text` with per-call options.
    ///
    /// Input is trimmed first. Blank input returns an empty string without
    /// running any processor.
    pub fn process_with(&self, text: &str, options: &Options) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        log::trace!("processing {} byte(s)", text.len());
        let processed = Chain::new(&self.processors).run(text.to_string(), options);
        if options.debug {
            processed.replace([NBSP, NNBSP], DEBUG_MARKER)
        } else {
            processed
        }
    }
}

impl fmt::Debug for Typus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typus")
            .field("processors", &self.processors.len())
            .field("quotes", &self.quotes)
            .finish()
    }
}

#[cfg(test)]
mod tests;
