//! Classification results with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Category, Percentages, ScoreTally};
use crate::recommendation::Recommendation;

/// The outcome of scoring one completed questionnaire.
///
/// Built once by the engine and never patched; rescoring produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Accumulated weight per category.
    pub scores: ScoreTally,
    /// Rounded share of the total per category. Need not sum to 100.
    pub percentages: Percentages,
    /// Category with the highest score.
    pub primary_category: Category,
    /// "Pure Vata", "Pitta-Kapha", and so on.
    pub constitution_label: String,
    /// Guidance for the primary category.
    pub recommendation: Recommendation,
    /// When the result was computed.
    pub completed_at: DateTime<Utc>,
}

impl ClassificationResult {
    /// Save the result as pretty-printed JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: ClassificationResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// Categories ordered by percentage, highest first, ties in priority order.
    pub fn ranked(&self) -> Vec<(Category, u32)> {
        self.percentages.ranked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::engine::score_questionnaire;
    use crate::model::AnswerSet;

    #[test]
    fn save_and_load_json() {
        let answers = AnswerSet::from_choices([0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 0]);
        let result = score_questionnaire(builtin(), &answers).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/result.json");
        result.save_json(&path).unwrap();

        let loaded = ClassificationResult::load_json(&path).unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn json_shape_uses_lowercase_categories() {
        let result = score_questionnaire(builtin(), &AnswerSet::from_choices([1; 12])).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["primary_category"], "pitta");
        assert_eq!(value["percentages"]["pitta"], 100);
        assert_eq!(value["constitution_label"], "Pure Pitta");
        assert!(value["recommendation"]["herb_support"]
            .as_str()
            .unwrap()
            .contains("Shatavari"));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ClassificationResult::load_json(Path::new("no/such/result.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read result"));
    }

    #[test]
    fn ranked_orders_by_percentage() {
        let answers = AnswerSet::from_choices([2, 2, 2, 2, 2, 1, 1, 1, 1, 0, 0, 0]);
        let result = score_questionnaire(builtin(), &answers).unwrap();
        let order: Vec<Category> = result.ranked().into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Kapha, Category::Pitta, Category::Vata]);
    }
}
