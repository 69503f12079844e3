pub mod dataset;
pub mod error;
pub mod source;

pub use dataset::Datasets;
pub use error::DataError;
pub use source::{read_disputes, read_trades, Loaded};
