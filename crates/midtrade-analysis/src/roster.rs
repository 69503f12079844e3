use midtrade_models::{Conflict, ConflictRoster, DisputeRecord};
use tracing::debug;

/// Resolve a dispute number to its participants and start year.
///
/// Returns `None` when no row carries `conflict_id`. With `assume_sorted` the
/// scan stops at the first row whose number exceeds the target, which is only
/// correct for input in ascending dispute order.
pub fn find_conflict(
    disputes: &[DisputeRecord],
    conflict_id: i64,
    assume_sorted: bool,
) -> Option<Conflict> {
    let mut roster = ConflictRoster::default();
    let mut start_year = None;
    let mut scanned = 0usize;

    for record in disputes {
        scanned += 1;
        if record.dispute_id != conflict_id {
            if assume_sorted && record.dispute_id > conflict_id {
                break;
            }
            continue;
        }
        start_year.get_or_insert(record.start_year);
        roster.add(&record.country, record.side, record.originator);
    }

    debug!(conflict_id, scanned, found = start_year.is_some(), "Dispute scan finished");

    start_year.map(|start_year| Conflict {
        id: conflict_id,
        start_year,
        roster,
    })
}
