//! Error type for building a [`Typus`](crate::Typus).
//!
//! Processing itself never fails; every error here is raised while the
//! pipeline is being assembled.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A typus with no processors can't process anything.
    #[error("empty typus: set processors")]
    NoProcessors,

    /// The quotes stage was requested without quote glyphs.
    #[error("quotes stage requires quote glyphs")]
    MissingQuotes,

    /// Quote glyphs collide with each other or with straight quotes.
    #[error("invalid quote glyphs {0:?}: all four must be distinct and not straight quotes")]
    InvalidQuotes(String),

    /// The expressions stage names a rule set nobody defined.
    #[error("unknown expression '{0}'")]
    UnknownExpression(String),

    /// A rule pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A [`Splinter`](crate::utils::Splinter) delimiter made of nothing usable.
    #[error("delimiter {0:?} can not be a slash or an empty space")]
    InvalidDelimiter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_expression_names_the_rule() {
        let err = ConfigError::UnknownExpression("foo".to_string());
        assert_eq!(err.to_string(), "unknown expression 'foo'");
    }

    #[test]
    fn invalid_pattern_shows_pattern_and_cause() {
        let err = ConfigError::InvalidPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "invalid pattern \"(\": unclosed group");
    }
}
