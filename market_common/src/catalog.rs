//! Catalog symbols and helpers shared between the feed and its consumers.
//!
//! The catalog is fixed at compile time. Symbol strings outside of it are still
//! accepted by the feed; the lookup helpers here return the fallback name and
//! sector for them instead of failing.

use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::defaults::FALLBACK_SECTOR;
use crate::error::FeedError;

/// Symbols known to the simulated exchange.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Hash,
    Eq,
    PartialEq,
)]
pub enum Ticker {
    RELIANCE,
    TCS,
    INFY,
    HDFCBANK,
    ICICIBANK,
    HINDUNILVR,
    BHARTIARTL,
    ASIANPAINT,
    ITC,
    KOTAKBANK,
}

impl Ticker {
    /// Human-readable company name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Ticker::RELIANCE => "Reliance Industries Limited",
            Ticker::TCS => "Tata Consultancy Services",
            Ticker::INFY => "Infosys Limited",
            Ticker::HDFCBANK => "HDFC Bank Limited",
            Ticker::ICICIBANK => "ICICI Bank Limited",
            Ticker::HINDUNILVR => "Hindustan Unilever Limited",
            Ticker::BHARTIARTL => "Bharti Airtel Limited",
            Ticker::ASIANPAINT => "Asian Paints Limited",
            Ticker::ITC => "ITC Limited",
            Ticker::KOTAKBANK => "Kotak Mahindra Bank",
        }
    }

    /// Sector label.
    pub fn sector(&self) -> &'static str {
        match self {
            Ticker::RELIANCE => "Oil & Gas",
            Ticker::TCS | Ticker::INFY => "Information Technology",
            Ticker::HDFCBANK | Ticker::ICICIBANK | Ticker::KOTAKBANK => "Banking",
            Ticker::HINDUNILVR | Ticker::ITC => "FMCG",
            Ticker::BHARTIARTL => "Telecom",
            Ticker::ASIANPAINT => "Paints",
        }
    }

    /// Price the feed starts from.
    pub fn baseline_price(&self) -> f64 {
        match self {
            Ticker::RELIANCE => 2847.65,
            Ticker::TCS => 3456.78,
            Ticker::INFY => 1523.90,
            Ticker::HDFCBANK => 1689.45,
            Ticker::ICICIBANK => 987.32,
            Ticker::HINDUNILVR => 2634.89,
            Ticker::BHARTIARTL => 1234.56,
            Ticker::ASIANPAINT => 3145.67,
            Ticker::ITC => 456.78,
            Ticker::KOTAKBANK => 1876.54,
        }
    }

    /// Resolve a raw symbol string against the catalog. Matching is exact.
    pub fn lookup(symbol: &str) -> Option<Ticker> {
        Ticker::from_str(symbol).ok()
    }
}

/// Display name for any symbol; unknown symbols become `"<SYMBOL> Limited"`.
pub fn display_name(symbol: &str) -> String {
    match Ticker::lookup(symbol) {
        Some(ticker) => ticker.display_name().to_string(),
        None => format!("{} Limited", symbol),
    }
}

/// Sector for any symbol; unknown symbols map to `"Others"`.
pub fn sector(symbol: &str) -> &'static str {
    Ticker::lookup(symbol)
        .map(|ticker| ticker.sector())
        .unwrap_or(FALLBACK_SECTOR)
}

/// Catalog baseline for a symbol, `None` when the symbol is not in the catalog.
pub fn baseline_price(symbol: &str) -> Option<f64> {
    Ticker::lookup(symbol).map(|ticker| ticker.baseline_price())
}

/// Returns `true` for non-empty, uppercase ASCII alphanumeric symbols.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Trait providing symbol-list parsing.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace or new lines. Every symbol
    /// must be uppercase alphanumeric; symbols outside the catalog are allowed.
    /// Duplicates are dropped, keeping first-seen order.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>, FeedError>;

    /// Same as [`Self::parse_from_reader`] for an in-memory list.
    fn parse_list(list: &str) -> Result<Vec<String>, FeedError> {
        Self::parse_from_reader(list.as_bytes())
    }
}

impl SymbolParser for Ticker {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>, FeedError> {
        let mut symbols: Vec<String> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(FeedError::Io)?;
            for raw in line.split(|c: char| c == ',' || c.is_whitespace()) {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if !is_valid_symbol(trimmed) {
                    return Err(FeedError::ParseSymbols(format!(
                        "'{}' is not an uppercase alphanumeric symbol",
                        trimmed
                    )));
                }
                if !symbols.iter().any(|s| s == trimmed) {
                    symbols.push(trimmed.to_string());
                }
            }
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn catalog_has_ten_entries_with_positive_baselines() {
        let all: Vec<Ticker> = Ticker::iter().collect();
        assert_eq!(all.len(), 10);
        assert!(all.iter().all(|t| t.baseline_price() > 0.0));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Ticker::lookup("RELIANCE"), Some(Ticker::RELIANCE));
        assert_eq!(Ticker::lookup("reliance"), None);
        assert_eq!(Ticker::lookup("RELIANCE.BSE"), None);
    }

    #[test]
    fn unknown_symbols_fall_back() {
        assert_eq!(sector("WIPRO"), "Others");
        assert_eq!(display_name("WIPRO"), "WIPRO Limited");
        assert_eq!(baseline_price("WIPRO"), None);
        assert_eq!(sector("TCS"), "Information Technology");
        assert_eq!(display_name("KOTAKBANK"), "Kotak Mahindra Bank");
    }

    #[test]
    fn parses_mixed_separators_and_drops_duplicates() {
        let input = "RELIANCE, TCS\nINFY  WIPRO\n\nTCS\n";
        let symbols = Ticker::parse_from_reader(input.as_bytes()).unwrap();
        assert_eq!(symbols, vec!["RELIANCE", "TCS", "INFY", "WIPRO"]);
    }

    #[test]
    fn rejects_lowercase_and_punctuation() {
        assert!(matches!(
            Ticker::parse_list("RELIANCE,tcs"),
            Err(FeedError::ParseSymbols(_))
        ));
        assert!(matches!(
            Ticker::parse_list("M&M"),
            Err(FeedError::ParseSymbols(_))
        ));
    }
}
