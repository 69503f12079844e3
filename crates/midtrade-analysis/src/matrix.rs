use std::collections::{BTreeMap, BTreeSet};

use midtrade_models::{TradeFilters, TradeMatrix, TradeRecord, TradeShareMatrix, UNKNOWN_COMBINED};
use tracing::debug;

/// Pairwise trade volume among `countries` in the year before `conflict_year`.
///
/// Returns `None` for fewer than two countries: there is nothing to relate.
/// Every listed country gets an entry, possibly with no partners.
pub fn build_trade_matrix(
    trades: &[TradeRecord],
    countries: &BTreeSet<String>,
    conflict_year: i32,
    filters: &TradeFilters,
) -> Option<TradeMatrix> {
    if countries.len() < 2 {
        return None;
    }

    let trade_year = conflict_year - 1;
    let mut matrix = TradeMatrix::with_countries(countries);
    let mut sentinels = 0usize;
    let mut unknown = 0usize;

    for record in trades {
        if record.year != trade_year
            || record.country1 == record.country2
            || !countries.contains(&record.country1)
            || !countries.contains(&record.country2)
        {
            continue;
        }
        if filters.require_nonzero_flows && record.has_zero_flow() {
            continue;
        }

        if filters.ignore_unknown && record.has_unknown_flow() {
            unknown += 1;
            continue;
        }

        let volume = record.volume();
        // Both flows unknown. Not a real trade relationship.
        if filters.ignore_unknown && volume == UNKNOWN_COMBINED {
            sentinels += 1;
            continue;
        }
        matrix.insert_symmetric(&record.country1, &record.country2, volume);
    }

    debug!(
        trade_year,
        countries = countries.len(),
        pairs = matrix.pairs().count(),
        sentinels,
        unknown,
        "Built trade matrix"
    );

    Some(matrix)
}

/// Convert absolute volumes to each country's share of its own total.
///
/// Shares are divided by the sum of absolute volumes, so their absolute values
/// add up to one. A country whose total is zero gets an empty share map.
pub fn normalize_trade_shares(matrix: &TradeMatrix) -> TradeShareMatrix {
    let mut shares = TradeShareMatrix::default();

    for (country, partners) in matrix.iter() {
        let total: f64 = partners.values().map(|v| v.abs()).sum();
        let normalized: BTreeMap<String, f64> = if total == 0.0 {
            BTreeMap::new()
        } else {
            partners
                .iter()
                .map(|(partner, volume)| (partner.clone(), volume / total))
                .collect()
        };
        shares.insert_country(country, normalized);
    }

    shares
}
