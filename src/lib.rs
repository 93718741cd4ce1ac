//! A typography engine for English and Russian text.
//!
//! Typus turns plain typing into typographically correct Unicode: nested
//! quotes, em and en dashes, non-breaking spaces after short words and
//! between numbers and units, primes, fractions, math signs and symbols
//! such as `(c)`. Html markup and caller-supplied phrases pass through
//! untouched.
//!
//! # Example
//!
//! ```rust
//! use typus::{Options, Typus};
//!
//! let typus = Typus::en().unwrap();
//!
//! assert_eq!(typus.process("Say \"what\" again!"), "Say “what” again!");
//! assert_eq!(typus.process("foo -- bar"), "foo\u{202f}—\u{2009}bar");
//!
//! // Debug mode shows non-breaking spaces
//! let options = Options::new().debug(true);
//! assert_eq!(typus.process_with("1 kg", &options), "1_kg");
//! ```

pub mod chars;
pub mod error;
pub mod processors;
mod typus;
pub mod utils;

pub use error::ConfigError;
pub use processors::quotes::Quotes;
pub use processors::{Chain, Probe, Processor, Stage};
pub use typus::{DEBUG_MARKER, Locale, Options, Typus, TypusBuilder};
