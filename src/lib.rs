pub mod bucket;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod questions;
pub mod session;
pub mod stats;
pub mod table;

pub use bucket::{Bucket, BucketedTable};
pub use config::Config;
pub use dispatcher::{QueryDispatcher, FALLBACK_ANSWER};
pub use error::{FeedbackError, Result};
pub use llm::{CompletionRequest, CompletionService, LlmClient};
pub use questions::{PredefinedQuestion, PREDEFINED_QUESTIONS};
pub use session::{QueryOutcome, Session};
pub use stats::ScoreStatistics;
pub use table::{FeedbackRow, FeedbackTable};
