use serde::{Deserialize, Serialize};

/// Top-level configuration for midtrade.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MidtradeConfig {
    pub data: DataConfig,
    pub filters: TradeFilters,
    pub render: RenderConfig,
}

/// Where the two datasets live and how they are prepared on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// MIDB participant-level CSV (`dispnum,styear,stabb,orig,sidea,...`).
    pub dispute_path: String,
    /// COW dyadic trade CSV (`importer1,importer2,year,flow1,flow2,...`).
    pub trade_path: String,
    /// Sort disputes by number on load so lookups can stop early.
    pub sort_disputes: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dispute_path: "data/mid/MIDB_5.0.csv".to_string(),
            trade_path: "data/cow/Dyadic_COW_4.0_shortened.csv".to_string(),
            sort_disputes: true,
        }
    }
}

/// Which trade records count when expanding partners and building matrices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TradeFilters {
    /// Skip records carrying the COW unknown-flow code, and the -18 volume it
    /// produces when both flows are unknown.
    pub ignore_unknown: bool,
    /// Skip records where either flow is zero.
    pub require_nonzero_flows: bool,
}

impl Default for TradeFilters {
    fn default() -> Self {
        Self {
            ignore_unknown: true,
            require_nonzero_flows: false,
        }
    }
}

/// Output settings for network renderings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    pub output_dir: String,
    pub width: u32,
    pub height: u32,
    /// Also write Graphviz DOT files next to the SVGs.
    pub export_dot: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: "output".to_string(),
            width: 900,
            height: 900,
            export_dot: true,
        }
    }
}
