//! Built-in English and Russian rule sets.
//!
//! Each rule set is a [`Producer`] registered in [`EXPRESSIONS`] under its
//! name. Producers read their data from [`Tables`], so units, symbols and
//! character classes can be swapped without touching the patterns.

use phf::{Map, phf_map};

use super::expressions::{Producer, Replace, Rule};
use crate::chars::{
    ANYSP, DPRIME, MDASH, MDASH_PAIR, MINUS, NBSP, NDASH, NNBSP, RSQUO, SPRIME, THNSP, TIMES, WHSP,
};
use crate::utils::{group, map_choices, re_choices};

/// Rule sets a locale preset runs, in order.
pub const DEFAULT_EXPRESSIONS: &[&str] = &[
    "spaces",
    "linebreaks",
    "apostrophe",
    "complex_symbols",
    "mdash",
    "primes",
    "digit_spaces",
    "pairs",
    "units",
    "ranges",
    "vulgar_fractions",
    "math",
    "ruble",
    "abbrs",
    "rep_positional_spaces",
    "del_positional_spaces",
];

/// Every built-in rule set by name.
pub static EXPRESSIONS: Map<&'static str, Producer> = phf_map! {
    "spaces" => expr_spaces as Producer,
    "linebreaks" => expr_linebreaks as Producer,
    "apostrophe" => expr_apostrophe as Producer,
    "complex_symbols" => expr_complex_symbols as Producer,
    "mdash" => expr_mdash as Producer,
    "primes" => expr_primes as Producer,
    "digit_spaces" => expr_digit_spaces as Producer,
    "pairs" => expr_pairs as Producer,
    "units" => expr_units as Producer,
    "ranges" => expr_ranges as Producer,
    "vulgar_fractions" => expr_vulgar_fractions as Producer,
    "math" => expr_math as Producer,
    "ruble" => expr_ruble as Producer,
    "abbrs" => expr_abbrs as Producer,
    "rep_positional_spaces" => expr_rep_positional_spaces as Producer,
    "del_positional_spaces" => expr_del_positional_spaces as Producer,
    "phones" => expr_phones as Producer,
};

static COMPLEX_SYMBOLS: Map<&'static str, &'static str> = phf_map! {
    "..." => "…",
    "<-" => "←",
    "->" => "→",
    "+-" => "±",
    "+−" => "±",
    "<=" => "≤",
    ">=" => "≥",
    "/=" => "≠",
    "==" => "≡",
    "(r)" => "®",
    "(c)" => "©",
    "(p)" => "℗",
    "(tm)" => "™",
    "(sm)" => "℠",
    "mA*h" => "mA•h",
    // Cyrillic look-alikes
    "(с)" => "©",
    "(р)" => "℗",
    "(тм)" => "™",
    "мА*ч" => "мА•ч",
};

static VULGAR_FRACTIONS: Map<&'static str, &'static str> = phf_map! {
    "1/2" => "½",
    "1/3" => "⅓",
    "1/4" => "¼",
    "1/5" => "⅕",
    "1/6" => "⅙",
    "1/8" => "⅛",
    "2/3" => "⅔",
    "2/5" => "⅖",
    "3/4" => "¾",
    "3/5" => "⅗",
    "3/8" => "⅜",
    "4/5" => "⅘",
    "5/6" => "⅚",
    "5/8" => "⅝",
    "7/8" => "⅞",
};

const UNITS: &[&str] = &[
    "mm", "cm", "dm", "m", "km", "mg", "kg", "ml", "dpi", "mA•h", "мм", "см", "дм", "м", "км", "мг",
    "г", "кг", "т", "мл", "л", "мА•ч",
];

/// Characters replaced by the `math` rule set, with their symbol.
const MATH: &[(&str, char)] = &[("-", MINUS), ("*xх", TIMES)];

/// Spaces next to symbols, see [`Tables::rep_positional_spaces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalSpaces {
    /// Symbols with a space on their left.
    pub before: &'static str,
    /// Symbols with a space on both sides.
    pub both: &'static str,
    /// Symbols with a space on their right.
    pub after: &'static str,
}

/// Data the built-in rule sets are made of.
#[derive(Debug, Clone, Copy)]
pub struct Tables {
    /// Regex class of letters.
    pub words: &'static str,
    /// Case-insensitive symbol replacements.
    pub complex_symbols: &'static Map<&'static str, &'static str>,
    /// Case-sensitive unit names.
    pub units: &'static [&'static str],
    pub vulgar_fractions: &'static Map<&'static str, &'static str>,
    pub math: &'static [(&'static str, char)],
    /// Regex class of math operators.
    pub math_operators: &'static str,
    /// Spaces turned into non-breaking ones.
    pub rep_positional_spaces: PositionalSpaces,
    /// Spaces removed. Only `before` is used by default.
    pub del_positional_spaces: PositionalSpaces,
    /// Alternation of ruble abbreviations.
    pub ruble: &'static str,
}

impl Tables {
    /// Data for English and Russian text.
    pub fn en_ru() -> Self {
        Tables {
            words: r"[^\W\d_]",
            complex_symbols: &COMPLEX_SYMBOLS,
            units: UNITS,
            vulgar_fractions: &VULGAR_FRACTIONS,
            math: MATH,
            math_operators: r"[\-−*xх×+=±≤≥≠÷/]",
            rep_positional_spaces: PositionalSpaces {
                before: "₽→—",
                both: "&≡≤≥≠",
                after: "←$€£%±−×©§¶№",
            },
            del_positional_spaces: PositionalSpaces {
                before: "®℗™℠:,.?!…",
                both: "",
                after: "",
            },
            ruble: "руб|р",
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Tables::en_ru()
    }
}

pub fn expr_spaces(_: &Tables) -> Vec<Rule> {
    vec![
        // Runs of spaces
        Rule::new(format!("{ANYSP}{{2,}}"), WHSP),
        // Leading and trailing spaces on every line
        Rule::new(format!("(?:^{ANYSP}+|{ANYSP}+$)"), ""),
    ]
}

pub fn expr_linebreaks(_: &Tables) -> Vec<Rule> {
    vec![Rule::new(r"\r\n", "\n"), Rule::new(r"\n{2,}", "\n\n")]
}

pub fn expr_apostrophe(tables: &Tables) -> Vec<Rule> {
    let words = tables.words;
    vec![Rule::new(format!("(?<={words}|[0-9])'(?={words})"), RSQUO)]
}

pub fn expr_complex_symbols(tables: &Tables) -> Vec<Rule> {
    let (choices, replace) = map_choices(tables.complex_symbols.entries().map(|(k, v)| (*k, *v)));
    vec![Rule::new(format!("({choices})"), replace)]
}

pub fn expr_mdash(_: &Tables) -> Vec<Rule> {
    vec![
        Rule::new(" -- ", MDASH_PAIR),
        Rule::new(format!(r"{ANYSP}+[\-{NDASH}]{ANYSP}+(?!\d\b)"), MDASH_PAIR),
        Rule::new(
            format!(r"(\b\D+){ANYSP}+[\-{NDASH}]{ANYSP}+"),
            format!("${{1}}{MDASH_PAIR}"),
        ),
        // Dash opening a line, as in dialogue
        Rule::new(format!(r"^\-{{1,2}}{ANYSP}+"), format!("{MDASH}{NBSP}")),
        // Dash closing a line
        Rule::new(
            format!(r"{ANYSP}+\-{{1,2}}{ANYSP}*(?=$|<br/?>)"),
            format!("{NBSP}{MDASH}"),
        ),
        Rule::new(format!(",{MDASH_PAIR}"), format!(",{MDASH}{THNSP}")),
    ]
}

pub fn expr_primes(_: &Tables) -> Vec<Rule> {
    vec![
        Rule::new(format!(r"(^|{ANYSP})(\d+)'"), format!("${{1}}${{2}}{SPRIME}")),
        Rule::new(format!(r#"(^|{ANYSP})(\d+)""#), format!("${{1}}${{2}}{DPRIME}")),
    ]
}

pub fn expr_digit_spaces(tables: &Tables) -> Vec<Rule> {
    let Tables { words, math_operators, .. } = tables;
    vec![Rule::new(
        format!(r"\b(\d{{1,3}}){WHSP}(?=[0-9]+\b|{words}|{math_operators})"),
        format!("${{1}}{NBSP}"),
    )]
}

pub fn expr_pairs(tables: &Tables) -> Vec<Rule> {
    let words = tables.words;
    vec![
        // Short words stick to the next one
        Rule::new(format!(r"\b({words}{{1,2}}){WHSP}+"), format!("${{1}}{NBSP}")),
        // Unless they're the tail of a hyphenated word or a contraction
        Rule::new(format!(r"([-…’]{words}{{1,2}}){NBSP}"), format!("${{1}}{WHSP}")),
    ]
}

pub fn expr_units(tables: &Tables) -> Vec<Rule> {
    let units = re_choices(tables.units.iter().copied());
    vec![
        Rule::new(
            format!(r"\b(\d+){WHSP}*({units})\b"),
            format!("${{1}}{NBSP}${{2}}"),
        )
        .case_sensitive(),
    ]
}

/// Decimal with either separator.
fn parse_number(number: &str) -> Option<f64> {
    number.replace(',', ".").parse().ok()
}

pub fn expr_ranges(tables: &Tables) -> Vec<Rule> {
    let Tables { words, math_operators, .. } = tables;
    let replace = Replace::func(|caps| {
        let (left, dash, right) = (group(caps, 1), group(caps, 2), group(caps, 3));
        match (parse_number(left), parse_number(right)) {
            (Some(from), Some(to)) if from < to => format!("{left}{NDASH}{right}"),
            _ => format!("{left}{dash}{right}"),
        }
    });
    vec![Rule::new(
        format!(
            r"(-?(?:[0-9]+[\.,][0-9]+|[0-9]+))(-)([0-9]+[\.,][0-9]+|[0-9]+)(?!{ANYSP}*{math_operators}|{words})"
        ),
        replace,
    )]
}

pub fn expr_vulgar_fractions(tables: &Tables) -> Vec<Rule> {
    let (choices, replace) = map_choices(tables.vulgar_fractions.entries().map(|(k, v)| (*k, *v)));
    vec![Rule::new(format!(r"\b({choices})\b"), replace)]
}

pub fn expr_math(tables: &Tables) -> Vec<Rule> {
    tables
        .math
        .iter()
        .map(|(chars, symbol)| {
            Rule::new(
                format!(r"(^|{ANYSP}|\d)[{}]({ANYSP}*\d)", fancy_regex::escape(chars)),
                format!("${{1}}{symbol}${{2}}"),
            )
        })
        .collect()
}

pub fn expr_ruble(tables: &Tables) -> Vec<Rule> {
    let ruble = tables.ruble;
    vec![Rule::new(format!(r"(\d){ANYSP}*(?:{ruble})\b\.?"), format!("${{1}}{NBSP}₽")).case_sensitive()]
}

pub fn expr_abbrs(tables: &Tables) -> Vec<Rule> {
    let words = tables.words;
    vec![
        Rule::new(
            format!(r"\b({words}\.){ANYSP}*({words}\.)"),
            format!("${{1}}{NNBSP}${{2}}"),
        ),
        Rule::new(format!(r"\b({words}\.){WHSP}*(?={words})"), format!("${{1}}{NBSP}")),
    ]
}

/// Rules replacing `find` next to the symbols in `spaces`.
fn positional_spaces(spaces: &PositionalSpaces, find: &str, replace: &str) -> Vec<Rule> {
    let before = fancy_regex::escape(&format!("{}{}", spaces.before, spaces.both)).into_owned();
    let after = fancy_regex::escape(&format!("{}{}", spaces.after, spaces.both)).into_owned();

    let mut rules = Vec::new();
    if !before.is_empty() {
        rules.push(Rule::new(format!("{find}+(?=[{before}])"), replace));
    }
    if !after.is_empty() {
        rules.push(Rule::new(format!("(?<=[{after}]){find}+"), replace));
    }
    rules
}

pub fn expr_rep_positional_spaces(tables: &Tables) -> Vec<Rule> {
    positional_spaces(&tables.rep_positional_spaces, &WHSP.to_string(), &NBSP.to_string())
}

pub fn expr_del_positional_spaces(tables: &Tables) -> Vec<Rule> {
    positional_spaces(&tables.del_positional_spaces, ANYSP, "")
}

/// Phone numbers such as `555-55-55`. Not part of [`DEFAULT_EXPRESSIONS`].
pub fn expr_phones(_: &Tables) -> Vec<Rule> {
    vec![Rule::new(
        r"([0-9]{2,4})\-([0-9]{2,4})\-([0-9]{2,4})",
        format!("${{1}}{NDASH}${{2}}{NDASH}${{3}}"),
    )]
}
