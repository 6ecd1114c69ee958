//! Session-scoped questionnaire state.
//!
//! A session owns one user's profile, their answers in progress and the most
//! recent result. The host decides its lifetime; nothing here is global.

use chrono::Utc;
use uuid::Uuid;

use crate::engine::score_questionnaire_at;
use crate::error::ScoringError;
use crate::model::{AnswerSet, QuestionCatalog};
use crate::profile::UserProfile;
use crate::report::ClassificationResult;

/// One user's pass through the questionnaire.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    profile: Option<UserProfile>,
    answers: AnswerSet,
    result: Option<ClassificationResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: None,
            answers: AnswerSet::new(),
            result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Record (or change) the answer to one question.
    pub fn answer(
        &mut self,
        catalog: &QuestionCatalog,
        question: usize,
        option: usize,
    ) -> Result<(), ScoringError> {
        let previous = self.answers.record(catalog, question, option)?;
        if let Some(previous) = previous.filter(|&p| p != option) {
            tracing::debug!(
                session = %self.id,
                question,
                previous,
                option,
                "answer changed"
            );
        }
        Ok(())
    }

    /// `(answered, total)` for progress display.
    pub fn progress(&self, catalog: &QuestionCatalog) -> (usize, usize) {
        let total = catalog.len();
        (total - self.answers.missing(catalog).len(), total)
    }

    pub fn is_complete(&self, catalog: &QuestionCatalog) -> bool {
        self.answers.is_complete(catalog)
    }

    /// Score the current answers, replacing any earlier result.
    ///
    /// On failure the previous result, if any, is left in place.
    pub fn submit(
        &mut self,
        catalog: &QuestionCatalog,
    ) -> Result<&ClassificationResult, ScoringError> {
        let result = score_questionnaire_at(catalog, &self.answers, Utc::now())?;
        tracing::debug!(session = %self.id, label = %result.constitution_label, "session submitted");
        Ok(self.result.insert(result))
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    /// Start over: forget answers and result, keep the profile.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::model::Category;
    use crate::profile::Gender;

    fn profile() -> UserProfile {
        toml::from_str(
            r#"
first_name = "Mira"
last_name = "Shah"
email = "mira@example.com"
age = 29
gender = "female"
height_cm = 160
weight_kg = 52
"#,
        )
        .unwrap()
    }

    #[test]
    fn answers_accumulate_until_complete() {
        let catalog = builtin();
        let mut session = Session::new();
        assert_eq!(session.progress(catalog), (0, 12));

        for q in 0..11 {
            session.answer(catalog, q, 1).unwrap();
        }
        assert_eq!(session.progress(catalog), (11, 12));
        assert!(!session.is_complete(catalog));

        let err = session.submit(catalog).unwrap_err();
        assert!(err.is_user_recoverable());
        assert!(session.result().is_none());

        session.answer(catalog, 11, 1).unwrap();
        let result = session.submit(catalog).unwrap();
        assert_eq!(result.primary_category, Category::Pitta);
        assert!(session.result().is_some());
    }

    #[test]
    fn invalid_answer_is_not_recorded() {
        let catalog = builtin();
        let mut session = Session::new();
        assert!(session.answer(catalog, 0, 7).is_err());
        assert!(session.answer(catalog, 40, 0).is_err());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn resubmitting_replaces_result() {
        let catalog = builtin();
        let mut session = Session::new();
        for q in 0..12 {
            session.answer(catalog, q, 0).unwrap();
        }
        assert_eq!(session.submit(catalog).unwrap().constitution_label, "Pure Vata");

        for q in 0..12 {
            session.answer(catalog, q, 2).unwrap();
        }
        assert_eq!(session.submit(catalog).unwrap().constitution_label, "Pure Kapha");
        assert_eq!(session.result().unwrap().scores.vata, 0);
    }

    #[test]
    fn reset_keeps_profile() {
        let catalog = builtin();
        let mut session = Session::new();
        session.set_profile(profile());
        for q in 0..12 {
            session.answer(catalog, q, 0).unwrap();
        }
        session.submit(catalog).unwrap();

        session.reset();
        assert!(session.answers().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.profile().unwrap().gender, Gender::Female);
    }

    #[test]
    fn sessions_have_distinct_ids() {
        assert_ne!(Session::new().id(), Session::new().id());
    }
}
