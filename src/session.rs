//! One interactive analysis session.
//!
//! The session owns at most one bucketed table. Uploading a new file
//! replaces it wholesale, and only once the new file has loaded. Every query
//! recomputes its statistics and prompt from the live bucket.

use crate::bucket::{Bucket, BucketedTable};
use crate::dispatcher::QueryDispatcher;
use crate::error::{FeedbackError, Result};
use crate::llm::CompletionService;
use crate::prompt::build_prompt;
use crate::questions::{find_question, question_by_number, PredefinedQuestion};
use crate::stats::ScoreStatistics;
use crate::table::FeedbackTable;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Result of one answered question.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub question: &'static str,
    pub bucket: Bucket,
    pub row_count: usize,
    pub statistics: ScoreStatistics,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub row_count: usize,
    pub statistics: ScoreStatistics,
}

pub struct Session<C> {
    dispatcher: QueryDispatcher<C>,
    table: Option<BucketedTable>,
}

impl<C: CompletionService> Session<C> {
    pub fn new(service: C) -> Self {
        Self {
            dispatcher: QueryDispatcher::new(service),
            table: None,
        }
    }

    pub fn dispatcher(&self) -> &QueryDispatcher<C> {
        &self.dispatcher
    }

    /// Load a CSV from disk. On failure the current table is left untouched.
    pub fn upload(&mut self, path: impl AsRef<Path>) -> Result<&BucketedTable> {
        let table = FeedbackTable::load_csv(path)?;
        Ok(self.replace_table(&table))
    }

    pub fn replace_table(&mut self, table: &FeedbackTable) -> &BucketedTable {
        self.table.insert(BucketedTable::partition(table))
    }

    pub fn table(&self) -> Option<&BucketedTable> {
        self.table.as_ref()
    }

    /// Local per-bucket overview. Makes no external call.
    pub fn summary(&self) -> Result<Vec<BucketSummary>> {
        let table = self.table.as_ref().ok_or(FeedbackError::NoTable)?;
        Ok(Bucket::ALL
            .iter()
            .map(|&bucket| {
                let rows = table.rows(bucket);
                BucketSummary {
                    bucket,
                    row_count: rows.len(),
                    statistics: ScoreStatistics::compute(rows),
                }
            })
            .collect())
    }

    pub async fn ask(&self, question: &str) -> Result<QueryOutcome> {
        let question = find_question(question)
            .ok_or_else(|| FeedbackError::UnknownQuestion(question.to_string()))?;
        self.ask_predefined(question).await
    }

    /// Ask by the 1-based number shown in the question list.
    pub async fn ask_number(&self, number: usize) -> Result<QueryOutcome> {
        let question = question_by_number(number)
            .ok_or_else(|| FeedbackError::UnknownQuestion(format!("#{}", number)))?;
        self.ask_predefined(question).await
    }

    async fn ask_predefined(&self, question: &'static PredefinedQuestion) -> Result<QueryOutcome> {
        let table = self.table.as_ref().ok_or(FeedbackError::NoTable)?;
        let rows = table.rows(question.bucket);
        let statistics = ScoreStatistics::compute(rows);
        let prompt = build_prompt(rows, &statistics);

        info!(
            "Analyzing {} bucket ({} rows, average {:.2})",
            question.bucket,
            rows.len(),
            statistics.average
        );
        let answer = self.dispatcher.dispatch(&prompt, question.text).await?;

        Ok(QueryOutcome {
            question: question.text,
            bucket: question.bucket,
            row_count: rows.len(),
            statistics,
            answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionRequest;
    use crate::table::FeedbackRow;
    use async_trait::async_trait;

    struct FailingService;

    #[async_trait]
    impl CompletionService for FailingService {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Err(FeedbackError::Llm("connection refused".to_string()))
        }
    }

    fn sample_table() -> FeedbackTable {
        FeedbackTable::from_rows(vec![
            FeedbackRow::new("late", 2.0),
            FeedbackRow::new("fine", 5.0),
            FeedbackRow::new("great", 9.0),
        ])
    }

    #[tokio::test]
    async fn test_ask_without_table() {
        let session = Session::new(FailingService);
        assert!(matches!(session.ask_number(1).await, Err(FeedbackError::NoTable)));
    }

    #[tokio::test]
    async fn test_unknown_question() {
        let mut session = Session::new(FailingService);
        session.replace_table(&sample_table());
        assert!(matches!(
            session.ask("What is the meaning of life?").await,
            Err(FeedbackError::UnknownQuestion(_))
        ));
        assert!(matches!(
            session.ask_number(99).await,
            Err(FeedbackError::UnknownQuestion(_))
        ));
    }

    #[tokio::test]
    async fn test_service_failure_keeps_table() {
        let mut session = Session::new(FailingService);
        session.replace_table(&sample_table());

        assert!(matches!(session.ask_number(4).await, Err(FeedbackError::Llm(_))));
        assert_eq!(session.table().map(|t| t.len()), Some(3));
    }

    #[test]
    fn test_summary() {
        let mut session = Session::new(FailingService);
        assert!(matches!(session.summary(), Err(FeedbackError::NoTable)));

        session.replace_table(&sample_table());
        let summary = session.summary().unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].bucket, Bucket::Low);
        assert_eq!(summary[0].row_count, 1);
        assert_eq!(summary[2].statistics.highest, 9.0);
    }

    #[test]
    fn test_failed_upload_keeps_previous_table() {
        let mut session = Session::new(FailingService);
        session.replace_table(&sample_table());

        let missing = std::env::temp_dir().join("feedback_lens_does_not_exist.csv");
        assert!(session.upload(&missing).is_err());
        assert_eq!(session.table().map(|t| t.len()), Some(3));
    }
}
