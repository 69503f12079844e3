use midtrade_models::config::DataConfig;
use midtrade_models::{DisputeRecord, TradeRecord};
use tracing::info;

use crate::error::DataError;
use crate::source::{open_disputes, open_trades};

/// Both datasets held in memory for a session.
///
/// Loaded once and only borrowed afterwards; every analysis stage reads from
/// the same instance.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    disputes: Vec<DisputeRecord>,
    trades: Vec<TradeRecord>,
    disputes_sorted: bool,
}

impl Datasets {
    /// Read both CSV files named in the config.
    pub fn load(config: &DataConfig) -> Result<Self, DataError> {
        let disputes = open_disputes(&config.dispute_path)?;
        info!(
            path = %config.dispute_path,
            records = disputes.records.len(),
            skipped = disputes.skipped,
            "Loaded dispute dataset"
        );

        let trades = open_trades(&config.trade_path)?;
        info!(
            path = %config.trade_path,
            records = trades.records.len(),
            skipped = trades.skipped,
            "Loaded trade dataset"
        );

        Ok(Self::from_records(
            disputes.records,
            trades.records,
            config.sort_disputes,
        ))
    }

    /// Build from already-parsed records. With `sort_disputes` the dispute
    /// rows are stably sorted by number, which lets lookups stop early.
    pub fn from_records(
        mut disputes: Vec<DisputeRecord>,
        trades: Vec<TradeRecord>,
        sort_disputes: bool,
    ) -> Self {
        if sort_disputes {
            disputes.sort_by_key(|d| d.dispute_id);
        }
        let disputes_sorted = sort_disputes || is_sorted(&disputes);
        Self {
            disputes,
            trades,
            disputes_sorted,
        }
    }

    pub fn disputes(&self) -> &[DisputeRecord] {
        &self.disputes
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// True when dispute rows are in ascending dispute-number order.
    pub fn disputes_sorted(&self) -> bool {
        self.disputes_sorted
    }
}

fn is_sorted(disputes: &[DisputeRecord]) -> bool {
    disputes
        .windows(2)
        .all(|w| w[0].dispute_id <= w[1].dispute_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use midtrade_models::Side;

    fn dispute(id: i64, country: &str) -> DisputeRecord {
        DisputeRecord {
            dispute_id: id,
            start_year: 1900,
            country: country.to_string(),
            originator: false,
            side: Side::A,
        }
    }

    #[test]
    fn sorts_disputes_when_asked() {
        let data = Datasets::from_records(
            vec![dispute(9, "AAA"), dispute(3, "BBB"), dispute(9, "CCC")],
            vec![],
            true,
        );
        let ids: Vec<i64> = data.disputes().iter().map(|d| d.dispute_id).collect();
        assert_eq!(ids, vec![3, 9, 9]);
        // Stable: rows of the same dispute keep their order.
        assert_eq!(data.disputes()[1].country, "AAA");
        assert!(data.disputes_sorted());
    }

    #[test]
    fn detects_unsorted_input_without_sorting() {
        let data =
            Datasets::from_records(vec![dispute(9, "AAA"), dispute(3, "BBB")], vec![], false);
        assert_eq!(data.disputes()[0].dispute_id, 9);
        assert!(!data.disputes_sorted());

        let data =
            Datasets::from_records(vec![dispute(1, "AAA"), dispute(3, "BBB")], vec![], false);
        assert!(data.disputes_sorted());
    }

    #[test]
    fn load_from_config_paths() {
        let dir = tempfile::tempdir().unwrap();
        let dispute_path = dir.path().join("midb.csv");
        let trade_path = dir.path().join("dyadic.csv");
        std::fs::write(
            &dispute_path,
            "dispnum,styear,stabb,orig,sidea\n5,1900,AAA,1,1\n",
        )
        .unwrap();
        std::fs::write(
            &trade_path,
            "importer1,importer2,year,flow1,flow2\nAAA,BBB,1899,5,3\n",
        )
        .unwrap();

        let config = DataConfig {
            dispute_path: dispute_path.to_string_lossy().into_owned(),
            trade_path: trade_path.to_string_lossy().into_owned(),
            sort_disputes: true,
        };
        let data = Datasets::load(&config).unwrap();
        assert_eq!(data.disputes().len(), 1);
        assert_eq!(data.trades().len(), 1);
    }
}
