//! Regex rules applied one after another.
//!
//! Rules are grouped into named rule sets. A rule set is produced by a
//! [`Producer`]: a plain function reading the data [`Tables`] and returning
//! the rules in the order they must run. Order matters, later rules see the
//! output of earlier ones (`mdash` claims `--` before `math` could turn it
//! into a minus).
//!
//! All patterns are compiled once, when the processor is built.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fancy_regex::{Captures, Regex};

use super::rules::{EXPRESSIONS, Tables};
use super::{Chain, Processor};
use crate::error::ConfigError;
use crate::typus::Options;
use crate::utils::{Case, re_compile, replace_all};

/// Builds the rules of one rule set from the data tables.
pub type Producer = fn(&Tables) -> Vec<Rule>;

type ReplaceFn = dyn Fn(&Captures<'_>) -> String + Send + Sync;

/// What a match is replaced with.
#[derive(Clone)]
pub enum Replace {
    /// Replacement text, `${1}` style group references are expanded.
    Template(String),
    /// Computed from the match.
    Func(Arc<ReplaceFn>),
}

impl Replace {
    pub fn func(func: impl Fn(&Captures<'_>) -> String + Send + Sync + 'static) -> Self {
        Replace::Func(Arc::new(func))
    }
}

impl From<&str> for Replace {
    fn from(template: &str) -> Self {
        Replace::Template(template.to_string())
    }
}

impl From<String> for Replace {
    fn from(template: String) -> Self {
        Replace::Template(template)
    }
}

impl From<char> for Replace {
    fn from(ch: char) -> Self {
        Replace::Template(ch.to_string())
    }
}

impl fmt::Debug for Replace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replace::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replace::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// A pattern and its replacement.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub replace: Replace,
    pub case: Case,
}

impl Rule {
    /// A case-insensitive rule.
    pub fn new(pattern: impl Into<String>, replace: impl Into<Replace>) -> Self {
        Rule {
            pattern: pattern.into(),
            replace: replace.into(),
            case: Case::Insensitive,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case = Case::Sensitive;
        self
    }
}

/// A compiled [`Rule`].
struct Expression {
    regex: Regex,
    replace: Replace,
}

impl Expression {
    fn compile(rule: Rule) -> Result<Self, ConfigError> {
        Ok(Expression {
            regex: re_compile(&rule.pattern, rule.case)?,
            replace: rule.replace,
        })
    }

    fn apply(&self, text: String) -> String {
        let replaced = match &self.replace {
            Replace::Template(template) => replace_all(&self.regex, &text, template.as_str()),
            Replace::Func(func) => replace_all(&self.regex, &text, |caps: &Captures<'_>| func(caps)),
        };
        replaced.unwrap_or(text)
    }
}

pub struct ExpressionsProcessor {
    expressions: Vec<Expression>,
}

impl ExpressionsProcessor {
    /// Compile the rule sets called `names`, in order.
    ///
    /// A name is looked up in `definitions` first, then among the built-in
    /// rule sets.
    pub fn new(
        names: &[String],
        tables: &Tables,
        definitions: &HashMap<String, Producer>,
    ) -> Result<Self, ConfigError> {
        let mut expressions = Vec::new();
        for name in names {
            let producer = definitions
                .get(name)
                .or_else(|| EXPRESSIONS.get(name.as_str()))
                .ok_or_else(|| ConfigError::UnknownExpression(name.clone()))?;
            for rule in producer(tables) {
                expressions.push(Expression::compile(rule)?);
            }
        }

        log::debug!(
            "compiled {} expression(s) from {} rule set(s)",
            expressions.len(),
            names.len()
        );
        Ok(ExpressionsProcessor { expressions })
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Run every expression over `text`, each one on the previous result.
    pub fn apply(&self, text: String) -> String {
        self.expressions
            .iter()
            .fold(text, |text, expression| expression.apply(text))
    }
}

impl Processor for ExpressionsProcessor {
    fn run(&self, text: String, options: &Options, next: Chain<'_>) -> String {
        next.run(self.apply(text), options)
    }
}
