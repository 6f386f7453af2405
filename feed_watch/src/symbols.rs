//! Resolving which symbols to watch from the command line.
use log::info;
use market_common::Result;
use market_common::catalog::SymbolParser;
use market_common::{FeedError, Ticker};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use strum::IntoEnumIterator;

/// Combine `--symbols` and `--path` into one de-duplicated list.
///
/// With neither given, the whole catalog is watched.
pub fn resolve_symbols(list: Option<&str>, path: Option<&str>) -> Result<Vec<String>> {
    let mut symbols = match list {
        Some(list) => Ticker::parse_list(list)?,
        None => Vec::new(),
    };

    if let Some(raw) = path {
        let file_path = normalize_path(raw);
        if !is_file_exist(&file_path) {
            return Err(FeedError::Format(format!(
                "symbol file not found: {}",
                file_path.display()
            )));
        }
        let file = File::open(&file_path)?;
        for symbol in Ticker::parse_from_reader(BufReader::new(file))? {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
    }

    if symbols.is_empty() {
        info!("No symbols given, watching the whole catalog");
        symbols = Ticker::iter().map(|t| t.to_string()).collect();
    }
    Ok(symbols)
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
