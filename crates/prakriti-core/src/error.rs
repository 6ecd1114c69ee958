//! Scoring and catalog error types.
//!
//! Every failure of a scoring attempt is local to that attempt. Retrying with
//! the same inputs yields the same error, so callers classify rather than retry.

use thiserror::Error;

use crate::model::Category;

/// Errors raised while scoring a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Scoring was attempted before every question had an answer.
    #[error("answer set is incomplete, {} question(s) unanswered", .missing.len())]
    IncompleteAnswerSet {
        /// Zero-based indices of the unanswered questions, ascending.
        missing: Vec<usize>,
    },

    /// An answer selects an option the question does not have.
    #[error(
        "question {} has {options} options, option index {option} is out of range",
        .question + 1
    )]
    InvalidOptionIndex {
        question: usize,
        option: usize,
        options: usize,
    },

    /// An answer refers to a question outside the catalog.
    #[error("question index {index} is outside a catalog of {len} questions")]
    UnknownQuestion { index: usize, len: usize },

    /// The tally sums to zero, so percentages are undefined.
    #[error("total score is zero, the catalog has no questions or only zero weights")]
    ZeroTotalScore,

    /// A category name outside the closed set reached a lookup.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl ScoringError {
    /// Returns `true` if the user can fix this by answering more questions.
    ///
    /// All other variants indicate a caller bug or a broken catalog.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, ScoringError::IncompleteAnswerSet { .. })
    }

    /// The unanswered question indices, if this is an incomplete-set error.
    pub fn missing_questions(&self) -> Option<&[usize]> {
        match self {
            ScoringError::IncompleteAnswerSet { missing } => Some(missing),
            _ => None,
        }
    }
}

/// Structural violations found while building a [`crate::model::QuestionCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("question {} has {found} options, expected {expected}", .question + 1)]
    WrongOptionCount {
        question: usize,
        found: usize,
        expected: usize,
    },

    #[error("question {} has more than one {category} option", .question + 1)]
    DuplicateCategory { question: usize, category: Category },

    #[error("question {} has no {category} option", .question + 1)]
    MissingCategory { question: usize, category: Category },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_incomplete_is_recoverable() {
        let incomplete = ScoringError::IncompleteAnswerSet { missing: vec![11] };
        assert!(incomplete.is_user_recoverable());
        assert_eq!(incomplete.missing_questions(), Some(&[11][..]));

        assert!(!ScoringError::ZeroTotalScore.is_user_recoverable());
        assert!(!ScoringError::UnknownCategory("agni".into()).is_user_recoverable());
        assert!(ScoringError::ZeroTotalScore.missing_questions().is_none());
    }

    #[test]
    fn messages_name_the_offending_indices() {
        let err = ScoringError::InvalidOptionIndex {
            question: 2,
            option: 5,
            options: 3,
        };
        assert_eq!(
            err.to_string(),
            "question 3 has 3 options, option index 5 is out of range"
        );

        let err = ScoringError::IncompleteAnswerSet {
            missing: vec![3, 7],
        };
        assert!(err.to_string().contains("2 question(s)"));
    }
}
