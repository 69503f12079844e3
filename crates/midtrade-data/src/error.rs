use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing column '{column}' in {dataset} dataset")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },
}
