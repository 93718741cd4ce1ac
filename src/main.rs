use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};

use typus::utils::Splinter;
use typus::{Locale, Options, Typus};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Language {
    En,
    Ru,
}

impl From<Language> for Locale {
    fn from(language: Language) -> Self {
        match language {
            Language::En => Locale::En,
            Language::Ru => Locale::Ru,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to process, standard input if omitted
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Language rules and quotes
    #[arg(short, long, value_enum, default_value_t = Language::En)]
    locale: Language,

    /// Show non-breaking spaces as underscores
    #[arg(short, long)]
    debug: bool,

    /// Phrases to leave untouched, split by the delimiter
    #[arg(short, long, value_name = "PHRASES")]
    escape: Option<String>,

    /// Delimiter for --escape, escape it with a backslash to keep it
    #[arg(long, value_name = "D", default_value = ",")]
    delimiter: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = match args.file.as_ref() {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            text
        }
    };

    let phrases = match args.escape.as_deref() {
        Some(phrases) => Splinter::new(&args.delimiter)?.split(phrases),
        None => Vec::new(),
    };
    let options = Options::new().debug(args.debug).escape_phrases(phrases);

    let typus = Typus::for_locale(args.locale.into())?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", typus.process_with(&text, &options)).context("Failed to write output")?;
    Ok(())
}
