//! Characters the engine reads and writes.
//!
//! Output glyphs are part of the public contract: callers may rely on the
//! exact code points listed here (e.g. which non-breaking space is used).

/// Non-breaking space.
pub const NBSP: char = '\u{00A0}';
/// Narrow non-breaking space.
pub const NNBSP: char = '\u{202F}';
/// Thin space.
pub const THNSP: char = '\u{2009}';
/// Regular whitespace.
pub const WHSP: char = ' ';
/// Regex class matching any space the engine treats as a word separator.
pub const ANYSP: &str = "[ \u{00A0}\u{202F}]";

pub const NDASH: char = '–';
pub const MDASH: char = '—';
/// Em dash surrounded by the spaces it gets in running text.
pub const MDASH_PAIR: &str = "\u{202F}—\u{2009}";

pub const MINUS: char = '−';
pub const TIMES: char = '×';

/// Left single curly quote.
pub const LSQUO: char = '‘';
/// Right single curly quote, also the apostrophe.
pub const RSQUO: char = '’';
/// Left double curly quote.
pub const LDQUO: char = '“';
/// Right double curly quote.
pub const RDQUO: char = '”';
/// Double low curly quote.
pub const DLQUO: char = '„';
/// Left angle quote.
pub const LAQUO: char = '«';
/// Right angle quote.
pub const RAQUO: char = '»';

pub const SPRIME: char = '′';
pub const DPRIME: char = '″';

/// Typographic quotes folded back to a straight quote before nesting.
pub const TYPO_QUOTES: [char; 7] = [LSQUO, RSQUO, LDQUO, RDQUO, DLQUO, LAQUO, RAQUO];

/// Straight quotes recognised as quote delimiters.
pub const STRAIGHT_QUOTES: [char; 2] = ['"', '\''];
