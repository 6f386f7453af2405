//! Ranking of a quote batch into gainers and losers.

use market_common::{Quote, TopMovers};

/// Split `quotes` into at most `limit` gainers (highest `change_percent` first)
/// and at most `limit` losers (lowest first). Flat quotes are in neither list.
pub fn rank_movers(quotes: Vec<Quote>, limit: usize) -> TopMovers {
    let (mut gainers, mut losers): (Vec<Quote>, Vec<Quote>) = quotes
        .into_iter()
        .filter(|q| q.change_percent != 0.0)
        .partition(|q| q.change_percent > 0.0);

    gainers.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
    losers.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent));
    gainers.truncate(limit);
    losers.truncate(limit);

    TopMovers { gainers, losers }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, change_percent: f64) -> Quote {
        Quote {
            id: symbol.to_lowercase(),
            symbol: symbol.to_string(),
            display_name: format!("{} Limited", symbol),
            price: 100.0,
            change: change_percent,
            change_percent,
            high: 101.0,
            low: 99.0,
            open: 100.0 - change_percent,
            volume: 1_000_000,
            market_cap: 5e9,
            sector: "Others".to_string(),
        }
    }

    #[test]
    fn sorts_and_truncates_each_side() {
        let quotes = vec![
            quote("A", 0.5),
            quote("B", -1.5),
            quote("C", 1.9),
            quote("D", 0.1),
            quote("E", -0.2),
            quote("F", 1.2),
            quote("G", 0.7),
            quote("H", 0.3),
            quote("I", -1.9),
        ];
        let movers = rank_movers(quotes, 5);

        let gainers: Vec<&str> = movers.gainers.iter().map(|q| q.symbol.as_str()).collect();
        let losers: Vec<&str> = movers.losers.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(gainers, vec!["C", "F", "G", "A", "H"]);
        assert_eq!(losers, vec!["I", "B", "E"]);
    }

    #[test]
    fn flat_quotes_are_excluded() {
        let movers = rank_movers(vec![quote("FLAT", 0.0)], 5);
        assert!(movers.gainers.is_empty());
        assert!(movers.losers.is_empty());
    }
}
