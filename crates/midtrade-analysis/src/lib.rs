pub mod analyzer;
pub mod error;
pub mod expander;
pub mod matrix;
pub mod modeler;
pub mod network;
pub mod render;
pub mod roster;

pub mod test_support;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use expander::expand_trade_partners;
pub use matrix::{build_trade_matrix, normalize_trade_shares};
pub use modeler::{assemble_join_samples, fit_join_models, LinfaRegressor, Regressor};
pub use network::{NetworkNode, TradeNetwork};
pub use render::{render_report, render_side, render_svg, write_dot};
pub use roster::find_conflict;
