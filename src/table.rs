//! Feedback table loading.
//!
//! An uploaded CSV must carry a `Comments` text column and a numeric
//! `Score` column. Every other column is ignored.

use crate::error::{FeedbackError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const COMMENTS_COLUMN: &str = "Comments";
pub const SCORE_COLUMN: &str = "Score";

const RAW_SCORE_COLUMN: &str = "__raw_score";

/// One line of customer feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRow {
    pub comment: String,
    pub score: f64,
}

impl FeedbackRow {
    pub fn new(comment: impl Into<String>, score: f64) -> Self {
        Self {
            comment: comment.into(),
            score,
        }
    }

    /// The serialized form used in prompts: `Comment: <text>. Score: <value>`.
    ///
    /// Scores use `f64` display, so `9.0` renders as `9` even when other rows
    /// in the file carry fractional scores.
    pub fn combined(&self) -> String {
        format!("Comment: {}. Score: {}", self.comment, self.score)
    }
}

/// Rows of one uploaded file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackTable {
    rows: Vec<FeedbackRow>,
}

impl FeedbackTable {
    pub fn from_rows(rows: Vec<FeedbackRow>) -> Self {
        Self { rows }
    }

    /// Load a feedback CSV from disk.
    ///
    /// Headers are matched after trimming surrounding whitespace. A row whose
    /// score is missing, non-numeric or NaN rejects the whole file.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading feedback file {}", path.display());

        let headers = read_headers(path)?;
        let comments_header = find_header(&headers, COMMENTS_COLUMN)?;
        let score_header = find_header(&headers, SCORE_COLUMN)?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()?
            .select([
                col(&comments_header)
                    .cast(DataType::String)
                    .alias(COMMENTS_COLUMN),
                // Parsed per row so padded cells like " 8" still count as numbers.
                col(&score_header)
                    .cast(DataType::String)
                    .alias(RAW_SCORE_COLUMN),
            ])
            .collect()?;

        let table = Self::from_frame(&df)?;
        info!("Loaded {} feedback rows", table.len());
        Ok(table)
    }

    fn from_frame(df: &DataFrame) -> Result<Self> {
        let comments = df.column(COMMENTS_COLUMN)?.str()?;
        let raw_scores = df.column(RAW_SCORE_COLUMN)?.str()?;

        let mut rows = Vec::with_capacity(df.height());
        for (idx, (comment, raw)) in comments
            .into_iter()
            .zip(raw_scores.into_iter())
            .enumerate()
        {
            let parsed = raw.and_then(|r| r.trim().parse::<f64>().ok());
            let score = match parsed {
                Some(s) if !s.is_nan() => s,
                _ => {
                    return Err(FeedbackError::InvalidScore {
                        row: idx + 1,
                        value: raw.unwrap_or("").to_string(),
                    })
                }
            };
            rows.push(FeedbackRow::new(comment.unwrap_or(""), score));
        }

        debug!("Parsed {} rows from data frame", rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FeedbackRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    Ok(rdr.headers()?.iter().map(|h| h.to_string()).collect())
}

/// Returns the header as written in the file so polars can select it.
fn find_header(headers: &[String], wanted: &str) -> Result<String> {
    headers
        .iter()
        .find(|h| h.trim() == wanted)
        .cloned()
        .ok_or_else(|| FeedbackError::MissingColumn(wanted.to_string()))
}
