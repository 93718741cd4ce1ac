//! Escape processors hide parts of the text from the rest of the chain.
//!
//! Before handing the text on, an escape processor swaps every protected span
//! for a placeholder key and keeps the original in a [`Storage`]. After the
//! chain returns, the keys are swapped back, so the spans come out byte for
//! byte as they went in.
//!
//! Nested tags of the same kind (`<code>` within `<code>`) are not supported:
//! the outer block ends at the first closing tag.

use std::sync::Arc;

use fancy_regex::{Captures, Regex};

use super::{Chain, Probe, Processor};
use crate::error::ConfigError;
use crate::typus::Options;
use crate::utils::{Case, re_compile, replace_all};

/// Tags whose whole block, content included, is left untouched.
pub const SKIP_TAGS: &[&str] = &[
    "head", "iframe", "pre", "code", "script", "style", "video", "audio", "canvas",
];

/// Escaped spans of one call, in the order they were saved.
#[derive(Debug)]
pub struct Storage {
    kind: &'static str,
    records: Vec<(String, String)>,
}

impl Storage {
    pub fn new(kind: &'static str) -> Self {
        Storage {
            kind,
            records: Vec::new(),
        }
    }

    /// Keep `value` and return the key standing in for it.
    pub fn store(&mut self, value: impl Into<String>) -> String {
        let key = format!("{{#{}{}#}}", self.kind, self.records.len());
        self.records.push((key.clone(), value.into()));
        key
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Put the stored values back, last saved first.
    ///
    /// A later span may enclose the key of an earlier one (a comment holding
    /// a tag), so the order matters.
    pub fn restore(&self, text: String) -> String {
        self.records
            .iter()
            .rev()
            .fold(text, |text, (key, value)| text.replace(key, value))
    }
}

/// Finds the spans an [`Escape`] processor protects.
pub trait SaveValues: Send + Sync {
    /// Word embedded in placeholder keys.
    const KIND: &'static str;

    fn save_values(&self, text: String, storage: &mut Storage, options: &Options) -> String;
}

/// Generic escape processor: save, run the rest of the chain, restore.
pub struct Escape<S> {
    saver: S,
    probe: Option<Arc<dyn Probe>>,
}

impl<S: SaveValues> Escape<S> {
    pub fn new(saver: S) -> Self {
        Escape { saver, probe: None }
    }

    pub fn with_probe(mut self, probe: Option<Arc<dyn Probe>>) -> Self {
        self.probe = probe;
        self
    }

    /// Escape `text` without running anything else.
    pub fn save(&self, text: String, options: &Options) -> (String, Storage) {
        let mut storage = Storage::new(S::KIND);
        let escaped = self.saver.save_values(text, &mut storage, options);
        (escaped, storage)
    }
}

impl<S: SaveValues> Processor for Escape<S> {
    fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String {
        let (escaped, storage) = self.save(text, options);
        let processed = next.run(escaped, options);
        if storage.is_empty() {
            return processed;
        }

        log::trace!("restoring {} {} span(s)", storage.len(), S::KIND);
        if let Some(probe) = &self.probe {
            probe.restored(S::KIND, storage.len());
        }
        storage.restore(processed)
    }
}

/// Escapes caller-supplied phrases, see [`Options::escape_phrases`].
///
/// Blank phrases are ignored, and so are phrases not found in the text.
pub struct Phrases;

impl SaveValues for Phrases {
    const KIND: &'static str = "phrase";

    fn save_values(&self, mut text: String, storage: &mut Storage, options: &Options) -> String {
        for phrase in &options.escape_phrases {
            if phrase.trim().is_empty() || !text.contains(phrase.as_str()) {
                continue;
            }
            let key = storage.store(phrase.as_str());
            text = text.replace(phrase.as_str(), &key);
        }
        text
    }
}

/// Escapes html: skip-tag blocks, then any other tag, then comments.
pub struct Html {
    patterns: [Regex; 3],
}

impl Html {
    pub fn new() -> Result<Self, ConfigError> {
        let skip_tags = SKIP_TAGS.join("|");
        Ok(Html {
            patterns: [
                // Whole block with its content
                re_compile(&format!(r"<({skip_tags})\b.*?>.*?</\1>"), Case::Insensitive)?,
                // Doctype, xml, closing tag, any tag
                re_compile(r"<[!?/]?[a-z]+.*?>", Case::Insensitive)?,
                re_compile(r"<!--.*?-->", Case::Insensitive)?,
            ],
        })
    }
}

impl SaveValues for Html {
    const KIND: &'static str = "html";

    fn save_values(&self, mut text: String, storage: &mut Storage, _options: &Options) -> String {
        for pattern in &self.patterns {
            let replaced = replace_all(pattern, &text, |caps: &Captures<'_>| storage.store(&caps[0]));
            if let Some(replaced) = replaced {
                text = replaced;
            }
        }
        text
    }
}
