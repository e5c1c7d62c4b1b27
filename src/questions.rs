//! The fixed set of questions a user can ask, each tied to one bucket.

use crate::bucket::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedQuestion {
    pub text: &'static str,
    pub bucket: Bucket,
}

// Texts are sent to the completion service verbatim, trailing spaces included.
pub static PREDEFINED_QUESTIONS: [PredefinedQuestion; 7] = [
    PredefinedQuestion {
        text: "What factors contribute to the high Score in the data? Are there any common themes or key drivers of customer satisfaction?",
        bucket: Bucket::High,
    },
    PredefinedQuestion {
        text: "How can we further build on the positive trends identified in the high-rated feedback?",
        bucket: Bucket::High,
    },
    PredefinedQuestion {
        text: "For high, What is the average Score in the data? ",
        bucket: Bucket::High,
    },
    PredefinedQuestion {
        text: "What are the main reasons for low Score in the data? Are there consistent issues mentioned by customers?",
        bucket: Bucket::Low,
    },
    PredefinedQuestion {
        text: "How can we address the issues identified in the low-rated feedback to improve customer experience?",
        bucket: Bucket::Low,
    },
    PredefinedQuestion {
        text: "For low, What is the average Score in the data? ",
        bucket: Bucket::Low,
    },
    PredefinedQuestion {
        text: "Are there specific areas that need improvement or attention that can be deduced based on moderate customer satisfaction?",
        bucket: Bucket::Medium,
    },
];

pub fn predefined_questions() -> &'static [PredefinedQuestion] {
    &PREDEFINED_QUESTIONS
}

/// Exact-text lookup.
pub fn find_question(text: &str) -> Option<&'static PredefinedQuestion> {
    PREDEFINED_QUESTIONS.iter().find(|q| q.text == text)
}

/// 1-based lookup, matching the numbering shown to users.
pub fn question_by_number(number: usize) -> Option<&'static PredefinedQuestion> {
    number
        .checked_sub(1)
        .and_then(|idx| PREDEFINED_QUESTIONS.get(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_coverage() {
        let count = |bucket| {
            PREDEFINED_QUESTIONS
                .iter()
                .filter(|q| q.bucket == bucket)
                .count()
        };
        assert_eq!(count(Bucket::High), 3);
        assert_eq!(count(Bucket::Low), 3);
        assert_eq!(count(Bucket::Medium), 1);
    }

    #[test]
    fn test_texts_are_unique() {
        let mut texts: Vec<&str> = PREDEFINED_QUESTIONS.iter().map(|q| q.text).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), PREDEFINED_QUESTIONS.len());
    }

    #[test]
    fn test_lookup_by_number() {
        assert_eq!(question_by_number(0), None);
        assert_eq!(question_by_number(8), None);
        assert_eq!(question_by_number(7).map(|q| q.bucket), Some(Bucket::Medium));
        assert_eq!(question_by_number(1), Some(&PREDEFINED_QUESTIONS[0]));
    }

    #[test]
    fn test_lookup_by_text_is_exact() {
        let q = find_question("For low, What is the average Score in the data? ").unwrap();
        assert_eq!(q.bucket, Bucket::Low);
        assert!(find_question("For low, What is the average Score in the data?").is_none());
    }
}
