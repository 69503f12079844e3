pub mod config;
pub mod dispute;
pub mod join_model;
pub mod report;
pub mod trade;

pub use config::{DataConfig, MidtradeConfig, RenderConfig, TradeFilters};
pub use dispute::{Conflict, ConflictRoster, DisputeRecord, Side};
pub use join_model::{
    JoinModels, JoinSample, LinearFit, LogisticFit, ModelOutcome, UnavailableReason,
};
pub use report::{
    ConflictReport, EdgeView, NetworkView, NodeRole, NodeView, SideNetworks, SideReport,
};
pub use trade::{TradeMatrix, TradeRecord, TradeShareMatrix, UNKNOWN_COMBINED, UNKNOWN_FLOW};
