//! Prompt construction.
//!
//! The prompt is a data block (one `Comment: ... Score: ...` line per row,
//! followed by a summary footer) wrapped in a fixed instruction template that
//! restricts the model to that data and asks for a single-key JSON reply.

use crate::stats::ScoreStatistics;
use crate::table::FeedbackRow;

/// The only key read back from the model's JSON reply.
///
/// It stays `"question"` whatever was asked; two answers in one reply would
/// collide on it.
pub const ANSWER_KEY: &str = "question";

/// Serialize rows (in their current order) plus the statistics footer.
pub fn build_data_block(rows: &[FeedbackRow], stats: &ScoreStatistics) -> String {
    let mut block = rows
        .iter()
        .map(FeedbackRow::combined)
        .collect::<Vec<_>>()
        .join("\n");

    block.push_str("\n\n--- Summary Statistics ---\n");
    block.push_str(&format!("Average Score: {:.2}\n", stats.average));
    block.push_str(&format!("Highest Score: {}\n", stats.highest));
    block.push_str(&format!("Lowest Score: {}\n", stats.lowest));
    block
}

pub fn build_prompt(rows: &[FeedbackRow], stats: &ScoreStatistics) -> String {
    let data = build_data_block(rows, stats);
    format!(
        r#"Below is the data containing combined comments and ratings, along with summary statistics:

{data}

NOTE: All the calculations have been predefined and you do not need to calculate anything from your own knowledge base. Do not use any outside knowledge. Just respond from this file: {data}

You are tasked with analyzing this data to provide meaningful insights, identify trends, and suggest actionable recommendations based on the patterns in the scores and comments.

Return your answer as a single JSON object with exactly one key, structured as:
{{
    "{key}": "answer"
}}"#,
        data = data,
        key = ANSWER_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeedbackRow> {
        vec![FeedbackRow::new("Okay", 5.0), FeedbackRow::new("Superb", 9.0)]
    }

    #[test]
    fn test_data_block_lines_in_order() {
        let rows = rows();
        let block = build_data_block(&rows, &ScoreStatistics::compute(&rows));
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "Comment: Okay. Score: 5");
        assert_eq!(lines[1], "Comment: Superb. Score: 9");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "--- Summary Statistics ---");
        assert_eq!(lines[4], "Average Score: 7.00");
        assert_eq!(lines[5], "Highest Score: 9");
        assert_eq!(lines[6], "Lowest Score: 5");
    }

    #[test]
    fn test_average_two_decimals() {
        let rows = vec![
            FeedbackRow::new("a", 1.0),
            FeedbackRow::new("b", 2.0),
            FeedbackRow::new("c", 2.0),
        ];
        let block = build_data_block(&rows, &ScoreStatistics::compute(&rows));
        assert!(block.contains("Average Score: 1.67\n"));
    }

    #[test]
    fn test_empty_subset_prompt() {
        let prompt = build_prompt(&[], &ScoreStatistics::default());
        assert!(prompt.contains("Average Score: 0.00"));
        assert!(prompt.contains("Highest Score: 0"));
        assert!(prompt.contains("Lowest Score: 0"));
        assert!(!prompt.contains("Comment:"));
    }

    #[test]
    fn test_prompt_contract() {
        let rows = rows();
        let prompt = build_prompt(&rows, &ScoreStatistics::compute(&rows));
        assert!(prompt.contains("Comment: Superb. Score: 9"));
        assert!(prompt.contains("Do not use any outside knowledge"));
        assert!(prompt.contains("Just respond from this file"));
        assert!(prompt.contains("\"question\": \"answer\""));
        assert!(prompt.contains("exactly one key"));
    }
}
