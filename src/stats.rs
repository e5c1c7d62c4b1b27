use crate::table::FeedbackRow;
use serde::{Deserialize, Serialize};

/// Summary of the scores in a row subset.
///
/// An empty subset yields all zeros rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

impl ScoreStatistics {
    pub fn compute(rows: &[FeedbackRow]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let (sum, highest, lowest) = rows.iter().fold(
            (0.0_f64, f64::NEG_INFINITY, f64::INFINITY),
            |(sum, hi, lo), row| (sum + row.score, hi.max(row.score), lo.min(row.score)),
        );

        Self {
            average: sum / rows.len() as f64,
            highest,
            lowest,
        }
    }
}
