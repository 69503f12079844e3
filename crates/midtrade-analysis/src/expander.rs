use std::collections::BTreeSet;

use midtrade_models::{TradeFilters, TradeRecord};
use tracing::debug;

/// Whether a trade row counts for `trade_year` under the configured filters.
pub fn qualifies(record: &TradeRecord, trade_year: i32, filters: &TradeFilters) -> bool {
    if record.year != trade_year {
        return false;
    }
    if filters.ignore_unknown && record.has_unknown_flow() {
        return false;
    }
    if filters.require_nonzero_flows && record.has_zero_flow() {
        return false;
    }
    true
}

/// Grow each side's roster with every country that traded with one of its
/// members in the year before `conflict_year`.
///
/// The rosters themselves are only read; each returned set starts as a copy
/// of its roster, so it is always a superset of it.
pub fn expand_trade_partners(
    trades: &[TradeRecord],
    roster_a: &[String],
    roster_b: &[String],
    conflict_year: i32,
    filters: &TradeFilters,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let trade_year = conflict_year - 1;
    let members_a: BTreeSet<&str> = roster_a.iter().map(String::as_str).collect();
    let members_b: BTreeSet<&str> = roster_b.iter().map(String::as_str).collect();

    let mut partners_a: BTreeSet<String> = roster_a.iter().cloned().collect();
    let mut partners_b: BTreeSet<String> = roster_b.iter().cloned().collect();

    for record in trades.iter().filter(|r| qualifies(r, trade_year, filters)) {
        add_counterparts(record, &members_a, &mut partners_a);
        add_counterparts(record, &members_b, &mut partners_b);
    }

    debug!(
        trade_year,
        roster_a = roster_a.len(),
        expanded_a = partners_a.len(),
        roster_b = roster_b.len(),
        expanded_b = partners_b.len(),
        "Expanded rosters with trade partners"
    );

    (partners_a, partners_b)
}

fn add_counterparts(
    record: &TradeRecord,
    members: &BTreeSet<&str>,
    partners: &mut BTreeSet<String>,
) {
    if members.contains(record.country1.as_str()) {
        partners.insert(record.country2.clone());
    }
    if members.contains(record.country2.as_str()) {
        partners.insert(record.country1.clone());
    }
}
