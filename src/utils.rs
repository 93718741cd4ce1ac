//! Pattern helpers shared by the processors.
//!
//! Every pattern in the crate goes through [`re_compile`] so the flags stay
//! consistent: Unicode-aware, multi-line and dot-matches-newline, plus
//! case-insensitive unless a rule asks otherwise.

use std::borrow::Cow;
use std::collections::HashMap;

use fancy_regex::{Captures, Regex, RegexBuilder, Replacer};
use itertools::Itertools;

use crate::error::ConfigError;
use crate::processors::expressions::Replace;

/// Case handling for a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Insensitive,
    Sensitive,
}

impl Case {
    fn flags(self) -> &'static str {
        match self {
            Case::Insensitive => "(?ims)",
            Case::Sensitive => "(?ms)",
        }
    }
}

/// Backtracking steps one search may take before the engine gives up.
///
/// The engine's own default is low enough for ordinary prose of a few
/// dozen kilobytes to reach it.
pub const BACKTRACK_LIMIT: usize = 100_000_000;

/// Compile `pattern` with the crate's standard flags.
pub fn re_compile(pattern: &str, case: Case) -> Result<Regex, ConfigError> {
    RegexBuilder::new(&format!("{}{}", case.flags(), pattern))
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .map_err(|err| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// Join escaped `choices` into a regex alternation (without a group).
///
/// ```
/// use typus::utils::re_choices;
///
/// assert_eq!(re_choices(["foo", "b.r"]), r"foo|b\.r");
/// ```
pub fn re_choices<'a>(choices: impl IntoIterator<Item = &'a str>) -> String {
    choices.into_iter().map(fancy_regex::escape).join("|")
}

/// Build an alternation of the keys in `data` and a replacement that maps a
/// match back to its value.
///
/// Keys are stored lower-cased and looked up the same way, so the pair is
/// meant for a case-insensitive pattern: `(C)` and `(c)` both map to `©`.
/// Longer keys come first in the alternation so a short key never shadows a
/// longer one sharing its prefix.
pub fn map_choices<'a>(data: impl IntoIterator<Item = (&'a str, &'a str)>) -> (String, Replace) {
    let options: HashMap<String, String> = data
        .into_iter()
        .map(|(find, replace)| (find.to_lowercase(), replace.to_string()))
        .collect();

    let choices = re_choices(
        options
            .keys()
            .map(String::as_str)
            .sorted_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b))),
    );

    let replace = Replace::func(move |caps| {
        let found = &caps[0];
        options
            .get(&found.to_lowercase())
            .cloned()
            .unwrap_or_else(|| found.to_string())
    });
    (choices, replace)
}

/// Replace every match of `regex` in `text`.
///
/// Returns `None` when nothing matched. A pattern that blows the engine's
/// backtracking limit is skipped with a warning, also yielding `None`, so
/// callers keep their input untouched.
pub fn replace_all<R: Replacer>(regex: &Regex, text: &str, replacer: R) -> Option<String> {
    match regex.try_replacen(text, 0, replacer) {
        Ok(Cow::Owned(replaced)) => Some(replaced),
        Ok(Cow::Borrowed(_)) => None,
        Err(err) => {
            log::warn!("skipping pattern {:?}: {}", regex.as_str(), err);
            None
        }
    }
}

/// Splits a list of phrases on a delimiter, honouring backslash-escaped
/// delimiters and stripping spaces around every phrase.
///
/// Meant for [`Options::escape_phrases`](crate::Options::escape_phrases).
///
/// ```
/// use typus::utils::Splinter;
///
/// let split = Splinter::new(",  ").unwrap();
/// assert_eq!(split.split(r"a, b,c ,  d\,e"), ["a", "b", "c", "d,e"]);
/// ```
#[derive(Debug)]
pub struct Splinter {
    delimiter: String,
    escaped: String,
    pattern: Regex,
}

impl Splinter {
    pub fn new(delimiter: &str) -> Result<Self, ConfigError> {
        let delim = delimiter.trim_matches([' ', '\\']);
        if delim.is_empty() {
            return Err(ConfigError::InvalidDelimiter(delimiter.to_string()));
        }

        // Doesn't split escaped delimiters
        let pattern = re_compile(
            &format!(r"(?<!\\){}\s*", fancy_regex::escape(delim)),
            Case::Sensitive,
        )?;
        Ok(Splinter {
            delimiter: delim.to_string(),
            escaped: format!("\\{delim}"),
            pattern,
        })
    }

    pub fn split(&self, phrases: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut start = 0;
        for found in self.pattern.find_iter(phrases) {
            match found {
                Ok(m) => {
                    parts.push(&phrases[start..m.start()]);
                    start = m.end();
                }
                Err(err) => {
                    log::warn!("splitting stopped early: {err}");
                    break;
                }
            }
        }
        parts.push(&phrases[start..]);

        parts
            .into_iter()
            .map(|part| part.replace(&self.escaped, &self.delimiter).trim().to_string())
            .collect()
    }
}

/// Convenience for replacement functions: the text of group `index`, or an
/// empty string when the group didn't take part in the match.
pub fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}
