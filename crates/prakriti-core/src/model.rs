//! Core data model types for prakriti.
//!
//! These are the fundamental types the scoring engine and the shell share:
//! categories, questions and their options, the catalog, and answer sets.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ScoringError};

/// One of the three constitution categories (doshas).
///
/// Declaration order is the fixed priority order used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vata,
    Pitta,
    Kapha,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Category; 3] = [Category::Vata, Category::Pitta, Category::Kapha];

    /// Lower-case identifier, as used in catalogs and serialized results.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vata => "vata",
            Category::Pitta => "pitta",
            Category::Kapha => "kapha",
        }
    }

    /// Identifier with its first character upper-cased.
    pub fn capitalized(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vata" => Ok(Category::Vata),
            "pitta" => Ok(Category::Pitta),
            "kapha" => Ok(Category::Kapha),
            _ => Err(ScoringError::UnknownCategory(s.to_string())),
        }
    }
}

/// Upper-case the first character and leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A value for each category. Every category is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub vata: T,
    pub pitta: T,
    pub kapha: T,
}

impl<T> PerCategory<T> {
    /// Build a map by evaluating `f` once per category, in priority order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            vata: f(Category::Vata),
            pitta: f(Category::Pitta),
            kapha: f(Category::Kapha),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Vata => &self.vata,
            Category::Pitta => &self.pitta,
            Category::Kapha => &self.kapha,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Vata => &mut self.vata,
            Category::Pitta => &mut self.pitta,
            Category::Kapha => &mut self.kapha,
        }
    }

    /// Entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        self.get(category)
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        self.get_mut(category)
    }
}

/// Accumulated option weight per category. Widened from the `u32` option
/// weight so sums of maximal weights stay exact.
pub type ScoreTally = PerCategory<u64>;

/// Each category's rounded share of the total, 0–100.
pub type Percentages = PerCategory<u32>;

impl PerCategory<u64> {
    /// Sum across all categories.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, &v)| v).sum()
    }
}

impl<T: Copy + Ord> PerCategory<T> {
    /// Entries ordered by value, highest first. Equal values keep priority
    /// order.
    pub fn ranked(&self) -> Vec<(Category, T)> {
        let mut ranked: Vec<(Category, T)> = self.iter().map(|(c, &v)| (c, v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Text shown to the user.
    pub text: String,
    /// Category this option contributes to.
    pub category: Category,
    /// Weight added to the category when chosen.
    pub weight: u32,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>, category: Category, weight: u32) -> Self {
        Self {
            text: text.into(),
            category,
            weight,
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Group heading, e.g. "Physical Characteristics".
    pub group: String,
    /// The question text.
    pub prompt: String,
    /// Options in display order. Position carries no category meaning.
    pub options: Vec<QuestionOption>,
}

/// Number of options every question must offer.
pub const OPTIONS_PER_QUESTION: usize = Category::ALL.len();

/// An ordered, immutable set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    id: String,
    name: String,
    description: String,
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, checking that each question offers exactly one option
    /// per category.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        for (index, question) in questions.iter().enumerate() {
            check_question(index, question)?;
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            questions,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn check_question(index: usize, question: &Question) -> Result<(), CatalogError> {
    if question.options.len() != OPTIONS_PER_QUESTION {
        return Err(CatalogError::WrongOptionCount {
            question: index,
            found: question.options.len(),
            expected: OPTIONS_PER_QUESTION,
        });
    }

    let mut seen = PerCategory::<bool>::default();
    for option in &question.options {
        if std::mem::replace(&mut seen[option.category], true) {
            return Err(CatalogError::DuplicateCategory {
                question: index,
                category: option.category,
            });
        }
    }

    if let Some((category, _)) = seen.iter().find(|&(_, &present)| !present) {
        return Err(CatalogError::MissingCategory {
            question: index,
            category,
        });
    }

    Ok(())
}

/// The user's chosen option per question, keyed by question index.
///
/// Partial sets are a normal intermediate state; only complete sets score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<usize, usize>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional option indices: entry `i` answers question `i`.
    pub fn from_choices(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: choices.into_iter().enumerate().collect(),
        }
    }

    /// Record an answer without validation, overwriting any previous one.
    ///
    /// Returns the previously chosen option, if any.
    pub fn insert(&mut self, question: usize, option: usize) -> Option<usize> {
        self.answers.insert(question, option)
    }

    /// Record an answer after checking both indices against `catalog`.
    pub fn record(
        &mut self,
        catalog: &QuestionCatalog,
        question: usize,
        option: usize,
    ) -> Result<Option<usize>, ScoringError> {
        resolve_option(catalog, question, option)?;
        Ok(self.insert(question, option))
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Entries in ascending question order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.answers.iter().map(|(&q, &o)| (q, o))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Catalog question indices that have no answer yet.
    pub fn missing(&self, catalog: &QuestionCatalog) -> Vec<usize> {
        (0..catalog.len())
            .filter(|i| !self.answers.contains_key(i))
            .collect()
    }

    pub fn is_complete(&self, catalog: &QuestionCatalog) -> bool {
        (0..catalog.len()).all(|i| self.answers.contains_key(&i))
    }
}

/// Look up the option an answer refers to.
pub(crate) fn resolve_option(
    catalog: &QuestionCatalog,
    question: usize,
    option: usize,
) -> Result<&QuestionOption, ScoringError> {
    let q = catalog.get(question).ok_or(ScoringError::UnknownQuestion {
        index: question,
        len: catalog.len(),
    })?;
    q.options
        .get(option)
        .ok_or(ScoringError::InvalidOptionIndex {
            question,
            option,
            options: q.options.len(),
        })
}
