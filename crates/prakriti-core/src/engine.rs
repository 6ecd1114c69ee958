//! The scoring engine.
//!
//! Turns a complete answer set into category totals, percentages, a primary
//! category and a constitution label. Everything here is a pure function of
//! its inputs apart from the completion timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{
    resolve_option, AnswerSet, Category, Percentages, QuestionCatalog, ScoreTally,
};
use crate::recommendation::recommendation_for;
use crate::report::ClassificationResult;

/// A leading category must beat the runner-up by more than this many
/// percentage points to be labelled "Pure".
pub const PURE_MARGIN: u32 = 20;

/// The derived part of a result, before recommendation lookup and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub scores: ScoreTally,
    pub percentages: Percentages,
    pub primary_category: Category,
    pub constitution_label: String,
}

/// Sum the weight of every chosen option into its category.
///
/// The answer set must cover every catalog question. Missing answers fail
/// before anything is tallied; out-of-range entries fail as they are found.
pub fn aggregate(
    catalog: &QuestionCatalog,
    answers: &AnswerSet,
) -> Result<ScoreTally, ScoringError> {
    let missing = answers.missing(catalog);
    if !missing.is_empty() {
        return Err(ScoringError::IncompleteAnswerSet { missing });
    }

    let mut tally = ScoreTally::default();
    for (question, option) in answers.iter() {
        let chosen = resolve_option(catalog, question, option)?;
        tally[chosen.category] += u64::from(chosen.weight);
    }

    tracing::debug!(
        vata = tally.vata,
        pitta = tally.pitta,
        kapha = tally.kapha,
        "aggregated {} answers",
        answers.len()
    );
    Ok(tally)
}

/// Derive percentages, primary category and constitution label from a tally.
pub fn classify(tally: &ScoreTally) -> Result<Classification, ScoringError> {
    let total = tally.total();
    if total == 0 {
        return Err(ScoringError::ZeroTotalScore);
    }

    let percentages = Percentages::from_fn(|c| percentage(tally[c], total));
    let primary_category = leading(tally);
    let constitution_label = constitution_label(&percentages);

    tracing::debug!(
        primary = %primary_category,
        label = %constitution_label,
        "classified tally"
    );

    Ok(Classification {
        scores: *tally,
        percentages,
        primary_category,
        constitution_label,
    })
}

/// `round(100 * part / total)`, halves rounded away from zero.
///
/// Integer arithmetic keeps exact halves exact.
fn percentage(part: u64, total: u64) -> u32 {
    let (part, total) = (u128::from(part), u128::from(total));
    let rounded = (200 * part + total) / (2 * total);
    // part <= total, so this is at most 100.
    rounded as u32
}

/// The category with the highest value. Ties go to the earlier category in
/// priority order.
fn leading(values: &ScoreTally) -> Category {
    let mut best = Category::ALL[0];
    for category in Category::ALL.into_iter().skip(1) {
        if values[category] > values[best] {
            best = category;
        }
    }
    best
}

/// "Pure X" when the top category leads by more than [`PURE_MARGIN`]
/// points, otherwise "X-Y" naming the top two.
fn constitution_label(percentages: &Percentages) -> String {
    let ranked = percentages.ranked();
    let (first, first_pct) = ranked[0];
    let (second, second_pct) = ranked[1];

    if first_pct - second_pct > PURE_MARGIN {
        format!("Pure {}", first.capitalized())
    } else {
        format!("{}-{}", first.capitalized(), second.capitalized())
    }
}

/// Score a completed questionnaire, stamping the result with the current time.
pub fn score_questionnaire(
    catalog: &QuestionCatalog,
    answers: &AnswerSet,
) -> Result<ClassificationResult, ScoringError> {
    score_questionnaire_at(catalog, answers, Utc::now())
}

/// Score a completed questionnaire with an explicit completion time.
pub fn score_questionnaire_at(
    catalog: &QuestionCatalog,
    answers: &AnswerSet,
    completed_at: DateTime<Utc>,
) -> Result<ClassificationResult, ScoringError> {
    let tally = aggregate(catalog, answers)?;
    let classification = classify(&tally)?;
    let recommendation = recommendation_for(classification.primary_category);

    tracing::info!(
        catalog = catalog.id(),
        label = %classification.constitution_label,
        "questionnaire scored"
    );

    Ok(ClassificationResult {
        scores: classification.scores,
        percentages: classification.percentages,
        primary_category: classification.primary_category,
        constitution_label: classification.constitution_label,
        recommendation,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::model::{Question, QuestionOption};

    fn tally(vata: u64, pitta: u64, kapha: u64) -> ScoreTally {
        ScoreTally { vata, pitta, kapha }
    }

    fn pct(vata: u32, pitta: u32, kapha: u32) -> Percentages {
        Percentages { vata, pitta, kapha }
    }

    fn small_catalog(weights: [[u32; 3]; 2]) -> QuestionCatalog {
        let questions = weights
            .iter()
            .map(|w| Question {
                group: "Test".into(),
                prompt: "Pick".into(),
                // Options deliberately not in priority order.
                options: vec![
                    QuestionOption::new("k", Category::Kapha, w[2]),
                    QuestionOption::new("v", Category::Vata, w[0]),
                    QuestionOption::new("p", Category::Pitta, w[1]),
                ],
            })
            .collect();
        QuestionCatalog::new("small", "Small", "", questions).unwrap()
    }

    #[test]
    fn all_first_options_is_pure_vata() {
        let catalog = builtin();
        let answers = AnswerSet::from_choices([0; 12]);
        let result = score_questionnaire(catalog, &answers).unwrap();

        assert_eq!(result.scores, tally(36, 0, 0));
        assert_eq!(result.percentages, pct(100, 0, 0));
        assert_eq!(result.primary_category, Category::Vata);
        assert_eq!(result.constitution_label, "Pure Vata");
        assert_eq!(result.recommendation, recommendation_for(Category::Vata));
    }

    #[test]
    fn category_comes_from_option_not_position() {
        let catalog = small_catalog([[1, 2, 4], [1, 2, 4]]);
        // Option 0 is the kapha option in this catalog.
        let answers = AnswerSet::from_choices([0, 2]);
        assert_eq!(aggregate(&catalog, &answers).unwrap(), tally(0, 2, 4));
    }

    #[test]
    fn tally_sum_equals_selected_weights() {
        let catalog = small_catalog([[1, 2, 4], [8, 16, 32]]);
        for a in 0..3 {
            for b in 0..3 {
                let answers = AnswerSet::from_choices([a, b]);
                let expected: u64 = answers
                    .iter()
                    .map(|(q, o)| u64::from(catalog.questions()[q].options[o].weight))
                    .sum();
                let scored = aggregate(&catalog, &answers).unwrap();
                assert_eq!(scored.total(), expected, "answers {a},{b}");
            }
        }
    }

    #[test]
    fn maximal_weights_sum_exactly() {
        let catalog = small_catalog([[u32::MAX, 1, 1], [u32::MAX, 1, 1]]);
        // Option 1 is the vata option in this catalog.
        let answers = AnswerSet::from_choices([1, 1]);
        let scored = aggregate(&catalog, &answers).unwrap();
        assert_eq!(scored, tally(2 * u64::from(u32::MAX), 0, 0));

        let c = classify(&scored).unwrap();
        assert_eq!(c.percentages, pct(100, 0, 0));
        assert_eq!(c.constitution_label, "Pure Vata");

        let answers = AnswerSet::from_choices([1, 2]);
        let c = classify(&aggregate(&catalog, &answers).unwrap()).unwrap();
        assert_eq!(c.percentages, pct(100, 0, 0));
        assert_eq!(c.scores.pitta, 1);
    }

    #[test]
    fn missing_answer_is_incomplete() {
        let answers = AnswerSet::from_choices([1; 11]);
        let err = score_questionnaire(builtin(), &answers).unwrap_err();
        assert_eq!(err, ScoringError::IncompleteAnswerSet { missing: vec![11] });
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut answers = AnswerSet::from_choices([0; 12]);
        answers.insert(4, 3);
        let err = aggregate(builtin(), &answers).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidOptionIndex {
                question: 4,
                option: 3,
                options: 3
            }
        );
    }

    #[test]
    fn answer_beyond_catalog_is_rejected() {
        let mut answers = AnswerSet::from_choices([0; 12]);
        answers.insert(12, 0);
        let err = aggregate(builtin(), &answers).unwrap_err();
        assert_eq!(err, ScoringError::UnknownQuestion { index: 12, len: 12 });
    }

    #[test]
    fn zero_total_is_rejected() {
        assert_eq!(classify(&tally(0, 0, 0)), Err(ScoringError::ZeroTotalScore));

        let empty = QuestionCatalog::new("empty", "Empty", "", vec![]).unwrap();
        let err = score_questionnaire(&empty, &AnswerSet::new()).unwrap_err();
        assert_eq!(err, ScoringError::ZeroTotalScore);

        let weightless = small_catalog([[0, 0, 0], [0, 0, 0]]);
        let answers = AnswerSet::from_choices([0, 1]);
        let err = score_questionnaire(&weightless, &answers).unwrap_err();
        assert_eq!(err, ScoringError::ZeroTotalScore);
    }

    #[test]
    fn percentages_round_independently() {
        // 1/3 each rounds down to 33, summing to 99.
        let c = classify(&tally(1, 1, 1)).unwrap();
        assert_eq!(c.percentages, pct(33, 33, 33));

        // 2/3 rounds up to 67 and 1/6 rounds 16.67 up to 17, summing to 101.
        let c = classify(&tally(4, 1, 1)).unwrap();
        assert_eq!(c.percentages, pct(67, 17, 17));
    }

    #[test]
    fn exact_halves_round_up() {
        // 1/8 = 12.5% and 7/8 = 87.5%.
        let c = classify(&tally(1, 7, 0)).unwrap();
        assert_eq!(c.percentages, pct(13, 88, 0));
    }

    #[test]
    fn ties_follow_priority_order() {
        let c = classify(&tally(10, 10, 5)).unwrap();
        assert_eq!(c.primary_category, Category::Vata);

        let c = classify(&tally(5, 10, 10)).unwrap();
        assert_eq!(c.primary_category, Category::Pitta);

        let c = classify(&tally(10, 5, 10)).unwrap();
        assert_eq!(c.primary_category, Category::Vata);

        let c = classify(&tally(7, 7, 7)).unwrap();
        assert_eq!(c.primary_category, Category::Vata);
        assert_eq!(c.constitution_label, "Vata-Pitta");
    }

    #[test]
    fn tied_percentages_rank_by_priority() {
        let c = classify(&tally(2, 5, 5)).unwrap();
        assert_eq!(c.primary_category, Category::Pitta);
        assert_eq!(c.constitution_label, "Pitta-Kapha");
    }

    #[test]
    fn wide_lead_is_pure() {
        // 60 / 38 / 2
        let c = classify(&tally(30, 19, 1)).unwrap();
        assert_eq!(c.percentages, pct(60, 38, 2));
        assert_eq!(c.constitution_label, "Pure Vata");
    }

    #[test]
    fn narrow_lead_is_dual() {
        // 55 / 40 / 5
        let c = classify(&tally(11, 8, 1)).unwrap();
        assert_eq!(c.percentages, pct(55, 40, 5));
        assert_eq!(c.constitution_label, "Vata-Pitta");
    }

    #[test]
    fn lead_of_exactly_twenty_is_dual() {
        // 60 / 40 / 0
        let c = classify(&tally(3, 0, 2)).unwrap();
        assert_eq!(c.percentages, pct(60, 0, 40));
        assert_eq!(c.constitution_label, "Vata-Kapha");
    }

    #[test]
    fn scoring_is_deterministic_apart_from_timestamp() {
        let answers = AnswerSet::from_choices([0, 1, 2, 1, 1, 2, 0, 1, 1, 2, 1, 0]);
        let first = score_questionnaire(builtin(), &answers).unwrap();
        let second = score_questionnaire(builtin(), &answers).unwrap();

        assert_eq!(first.scores, second.scores);
        assert_eq!(first.percentages, second.percentages);
        assert_eq!(first.primary_category, second.primary_category);
        assert_eq!(first.constitution_label, second.constitution_label);
        assert_eq!(first.recommendation, second.recommendation);

        // 3 vata, 6 pitta, 3 kapha answers.
        assert_eq!(first.scores, tally(9, 18, 9));
        assert_eq!(first.percentages, pct(25, 50, 25));
        assert_eq!(first.primary_category, Category::Pitta);
        assert_eq!(first.constitution_label, "Pure Pitta");
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let at = DateTime::parse_from_rfc3339("2025-03-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let answers = AnswerSet::from_choices([2; 12]);
        let result = score_questionnaire_at(builtin(), &answers, at).unwrap();
        assert_eq!(result.completed_at, at);
        assert_eq!(result.constitution_label, "Pure Kapha");
    }
}
