use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Regression error: {0}")]
    Regression(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
