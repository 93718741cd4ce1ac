//! Typographic quotes.
//!
//! The processor works in three steps:
//!
//! 1. Every typographic quote is normalized to a straight `'`, so quotes
//!    typed with mismatched glyphs are paired as if they were straight.
//! 2. Pairs are peeled off pass after pass: a pass replaces each `"…"` or
//!    `'…'` span holding no delimiter of its own kind with the odd pair.
//!    The other kind may appear inside, so crossed quoting such as
//!    `"a 'b" c'` is paired as `«a „b“ c»`. Delimiters must sit on word
//!    boundaries, which leaves apostrophes (`it's`) and primes (`4'`) alone,
//!    and the interior must not start or end with a space.
//! 3. If two or more passes ran, all levels share the odd pair, so the
//!    text is walked once more to alternate odd and even pairs by depth.

use std::fmt;
use std::sync::Arc;

use fancy_regex::{Captures, Regex};
use itertools::Itertools;

use super::{Chain, Probe, Processor};
use crate::chars::{DLQUO, LAQUO, LDQUO, LSQUO, RAQUO, RDQUO, RSQUO, STRAIGHT_QUOTES, TYPO_QUOTES};
use crate::error::ConfigError;
use crate::typus::Options;
use crate::utils::{Case, re_compile, replace_all};

/// Peeling passes allowed before the rest of the quotes are left as they are.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// The interior stops at the next delimiter of the same kind, so a stray
// opener costs a scan up to that delimiter rather than to the end of text.
const PEEL_PATTERN: &str = r#"(?<!\w)(["'])(?!\s)((?:(?!\1).)+?)(?<!\s)\1(?!\w)"#;

/// Quote glyphs: the odd pair wraps depth 1, 3, 5…, the even pair depth 2, 4…
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotes {
    pub loq: char,
    pub roq: char,
    pub leq: char,
    pub req: char,
}

impl Quotes {
    pub const EN: Quotes = Quotes {
        loq: LDQUO,
        roq: RDQUO,
        leq: LSQUO,
        req: RSQUO,
    };

    pub const RU: Quotes = Quotes {
        loq: LAQUO,
        roq: RAQUO,
        leq: DLQUO,
        req: LDQUO,
    };

    pub fn new(loq: char, roq: char, leq: char, req: char) -> Result<Self, ConfigError> {
        let quotes = Quotes { loq, roq, leq, req };
        quotes.validate()?;
        Ok(quotes)
    }

    /// All four glyphs must differ from each other and from straight quotes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let glyphs = [self.loq, self.roq, self.leq, self.req];
        let clash = glyphs.iter().any(|glyph| STRAIGHT_QUOTES.contains(glyph))
            || glyphs.iter().tuple_combinations().any(|(a, b)| a == b);
        if clash {
            return Err(ConfigError::InvalidQuotes(self.to_string()));
        }
        Ok(())
    }

    fn pairs(&self) -> [(char, char); 2] {
        [(self.loq, self.roq), (self.leq, self.req)]
    }
}

impl fmt::Display for Quotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…{} {}…{}", self.loq, self.roq, self.leq, self.req)
    }
}

pub struct QuotesProcessor {
    quotes: Quotes,
    pattern: Regex,
    max_depth: usize,
    probe: Option<Arc<dyn Probe>>,
}

impl QuotesProcessor {
    pub fn new(quotes: Quotes) -> Result<Self, ConfigError> {
        quotes.validate()?;
        Ok(QuotesProcessor {
            quotes,
            pattern: re_compile(PEEL_PATTERN, Case::Sensitive)?,
            max_depth: DEFAULT_MAX_DEPTH,
            probe: None,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_probe(mut self, probe: Option<Arc<dyn Probe>>) -> Self {
        self.probe = probe;
        self
    }

    pub fn quotes(&self) -> Quotes {
        self.quotes
    }

    /// Run all three steps on `text`.
    pub fn apply(&self, text: &str) -> String {
        let (peeled, passes) = self.peel(normalize(text));
        log::trace!("quotes peeled in {passes} pass(es)");
        if passes < 2 {
            return peeled;
        }

        if let Some(probe) = &self.probe {
            probe.nesting_switched(passes);
        }
        self.switch_nested(&peeled)
    }

    /// Replace innermost pairs with the odd pair until nothing matches.
    /// Returns the text and the number of passes that changed it.
    fn peel(&self, mut text: String) -> (String, usize) {
        let Quotes { loq, roq, .. } = self.quotes;
        let mut passes = 0;
        while passes < self.max_depth {
            let replaced = replace_all(&self.pattern, &text, |caps: &Captures<'_>| {
                format!("{loq}{}{roq}", &caps[2])
            });
            match replaced {
                Some(replaced) if replaced != text => {
                    text = replaced;
                    passes += 1;
                }
                _ => return (text, passes),
            }
        }

        if self.pattern.is_match(&text).unwrap_or(false) {
            log::warn!("quote nesting deeper than {} level(s), rest left as is", self.max_depth);
        }
        (text, passes)
    }

    /// Alternate odd and even pairs by depth.
    ///
    /// After peeling every level is written with the odd pair. The selector
    /// flips on each opening quote and again after each closing one, so
    /// siblings share a pair and each nested level gets the other one.
    fn switch_nested(&self, text: &str) -> String {
        let pairs = self.quotes.pairs();
        let mut selected = 1;
        text.chars()
            .map(|c| {
                if c == self.quotes.loq {
                    selected ^= 1;
                    pairs[selected].0
                } else if c == self.quotes.roq {
                    let right = pairs[selected].1;
                    selected ^= 1;
                    right
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Processor for QuotesProcessor {
    fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String {
        next.run(self.apply(&text), options)
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if TYPO_QUOTES.contains(&c) { '\'' } else { c })
        .collect()
}
