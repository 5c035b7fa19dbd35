//! Best-price reduction across sportsbooks.
//!
//! Many books quote the same market; a bettor only cares about the best
//! price per side. [`best_markets`] reduces a game's quotes to one
//! [`MarketBest`] per distinct (market, side, line) bucket.
//!
//! The reduction is pure and order-independent: the winning quote is the
//! maximum under the bettor-favorable price ordering, with ties broken by
//! lexicographically smallest book name, so any permutation of the input
//! produces the same output.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::odds::{MarketKind, OddsQuote, QuoteSide};
use super::record::MarketBest;

/// Reduce one game's quotes to the best price per (market, side, line).
///
/// Buckets nobody quoted are simply absent from the output; representing
/// unavailable markets is the record builder's job, not this reduction's.
pub fn best_markets(quotes: &[OddsQuote]) -> Vec<MarketBest> {
    let mut buckets: BTreeMap<(MarketKind, QuoteSide, Option<Decimal>), &OddsQuote> =
        BTreeMap::new();

    for quote in quotes {
        let key = (quote.market.clone(), quote.side, quote.line);
        match buckets.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(quote);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get();
                let wins = quote.price > current.price
                    || (quote.price == current.price && quote.book < current.book);
                if wins {
                    slot.insert(quote);
                }
            }
        }
    }

    buckets
        .into_iter()
        .map(|((market, side, line), quote)| MarketBest {
            market,
            side,
            line,
            price: quote.price,
            book: quote.book.clone(),
        })
        .collect()
}
