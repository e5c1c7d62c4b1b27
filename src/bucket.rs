use crate::table::{FeedbackRow, FeedbackTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Score range a feedback row falls into.
///
/// Low: score < 4, Medium: 4 <= score <= 7, High: score > 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Low, Bucket::Medium, Bucket::High];

    pub fn for_score(score: f64) -> Self {
        if score < 4.0 {
            Bucket::Low
        } else if score <= 7.0 {
            Bucket::Medium
        } else {
            Bucket::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Low => "low",
            Bucket::Medium => "medium",
            Bucket::High => "high",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A feedback table split into its three buckets, each sorted ascending by score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketedTable {
    low: Vec<FeedbackRow>,
    medium: Vec<FeedbackRow>,
    high: Vec<FeedbackRow>,
}

impl BucketedTable {
    pub fn partition(table: &FeedbackTable) -> Self {
        let mut bucketed = Self::default();
        for row in table.rows() {
            bucketed.rows_mut(Bucket::for_score(row.score)).push(row.clone());
        }

        // Stable sort, so equal scores keep file order.
        for bucket in Bucket::ALL {
            bucketed
                .rows_mut(bucket)
                .sort_by(|a, b| a.score.total_cmp(&b.score));
        }

        info!(
            "Bucketed {} rows: low={}, medium={}, high={}",
            table.len(),
            bucketed.low.len(),
            bucketed.medium.len(),
            bucketed.high.len()
        );
        bucketed
    }

    pub fn rows(&self, bucket: Bucket) -> &[FeedbackRow] {
        match bucket {
            Bucket::Low => &self.low,
            Bucket::Medium => &self.medium,
            Bucket::High => &self.high,
        }
    }

    fn rows_mut(&mut self, bucket: Bucket) -> &mut Vec<FeedbackRow> {
        match bucket {
            Bucket::Low => &mut self.low,
            Bucket::Medium => &mut self.medium,
            Bucket::High => &mut self.high,
        }
    }

    /// Total rows across all buckets.
    pub fn len(&self) -> usize {
        self.low.len() + self.medium.len() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(scores: &[f64]) -> FeedbackTable {
        FeedbackTable::from_rows(
            scores
                .iter()
                .enumerate()
                .map(|(i, s)| FeedbackRow::new(format!("row {}", i), *s))
                .collect(),
        )
    }

    fn scores(rows: &[FeedbackRow]) -> Vec<f64> {
        rows.iter().map(|r| r.score).collect()
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Bucket::for_score(3.9), Bucket::Low);
        assert_eq!(Bucket::for_score(4.0), Bucket::Medium);
        assert_eq!(Bucket::for_score(7.0), Bucket::Medium);
        assert_eq!(Bucket::for_score(7.1), Bucket::High);
        assert_eq!(Bucket::for_score(-2.0), Bucket::Low);
        assert_eq!(Bucket::for_score(42.0), Bucket::High);
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let input = table(&[9.0, 2.0, 5.0, 7.0, 4.0, 3.9, 7.1, 1.0, 10.0]);
        let bucketed = BucketedTable::partition(&input);

        assert_eq!(bucketed.len(), input.len());

        let mut seen: Vec<String> = Bucket::ALL
            .iter()
            .flat_map(|b| bucketed.rows(*b).iter().map(|r| r.comment.clone()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = input.rows().iter().map(|r| r.comment.clone()).collect();
        expected.sort();
        assert_eq!(seen, expected);

        for bucket in Bucket::ALL {
            assert!(bucketed
                .rows(bucket)
                .iter()
                .all(|r| Bucket::for_score(r.score) == bucket));
        }
    }

    #[test]
    fn test_each_bucket_sorted_ascending() {
        let bucketed = BucketedTable::partition(&table(&[3.0, 1.0, 2.0, 7.0, 4.0, 5.5, 10.0, 8.0, 9.0]));
        assert_eq!(scores(bucketed.rows(Bucket::Low)), vec![1.0, 2.0, 3.0]);
        assert_eq!(scores(bucketed.rows(Bucket::Medium)), vec![4.0, 5.5, 7.0]);
        assert_eq!(scores(bucketed.rows(Bucket::High)), vec![8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_equal_scores_keep_file_order() {
        let bucketed = BucketedTable::partition(&table(&[5.0, 4.0, 5.0]));
        let comments: Vec<&str> = bucketed
            .rows(Bucket::Medium)
            .iter()
            .map(|r| r.comment.as_str())
            .collect();
        assert_eq!(comments, vec!["row 1", "row 0", "row 2"]);
    }

    #[test]
    fn test_empty_table() {
        let bucketed = BucketedTable::partition(&FeedbackTable::default());
        assert!(bucketed.is_empty());
        for bucket in Bucket::ALL {
            assert!(bucketed.rows(bucket).is_empty());
        }
    }

    #[test]
    fn test_labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Bucket::Medium).unwrap(), "\"medium\"");
        assert_eq!(Bucket::High.to_string(), "high");
    }
}
