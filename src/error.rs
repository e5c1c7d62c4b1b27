use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid score in row {row}: {value}")]
    InvalidScore { row: usize, value: String },

    #[error("No API key configured (set OPENAI_API_KEY or BACKEND_API_URL)")]
    MissingCredential,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("No feedback file has been uploaded")]
    NoTable,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::error::PolarsError> for FeedbackError {
    fn from(err: polars::error::PolarsError) -> Self {
        FeedbackError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
