//! Question catalogs: the built-in questionnaire and TOML catalog files.
//!
//! Catalog files look like:
//!
//! ```toml
//! [catalog]
//! id = "prakriti"
//! name = "Prakriti Analysis"
//!
//! [[questions]]
//! group = "Physical Characteristics"
//! prompt = "What best describes your body frame?"
//!
//! [[questions.options]]
//! text = "Thin, light, small-boned"
//! category = "vata"
//! weight = 3
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Category, Question, QuestionCatalog, QuestionOption};

/// Weight given to options that don't specify one.
pub const DEFAULT_WEIGHT: u32 = 3;

/// The built-in twelve-question catalog.
pub fn builtin() -> &'static QuestionCatalog {
    static CATALOG: OnceLock<QuestionCatalog> = OnceLock::new();
    CATALOG.get_or_init(build_builtin)
}

fn build_builtin() -> QuestionCatalog {
    const PHYSICAL: &str = "Physical Characteristics";
    const DIGESTION: &str = "Appetite & Digestion";
    const SLEEP: &str = "Sleep & Energy";
    const MENTAL: &str = "Mental Characteristics";
    const WEATHER: &str = "Weather Preferences";

    let rows: [(&str, &str, [&str; 3]); 12] = [
        (
            PHYSICAL,
            "What best describes your body frame?",
            [
                "Thin, light, small-boned",
                "Medium build, moderate weight",
                "Large frame, heavy, well-built",
            ],
        ),
        (
            PHYSICAL,
            "How would you describe your skin?",
            [
                "Dry, rough, thin, cool",
                "Warm, oily, soft, with freckles/moles",
                "Thick, moist, cool, smooth",
            ],
        ),
        (
            PHYSICAL,
            "What is your hair like?",
            [
                "Dry, brittle, thin",
                "Fine, soft, early graying/balding",
                "Thick, oily, wavy, lustrous",
            ],
        ),
        (
            PHYSICAL,
            "How are your eyes?",
            [
                "Small, dry, active",
                "Sharp, bright, penetrating",
                "Large, soft, loving",
            ],
        ),
        (
            DIGESTION,
            "How is your appetite?",
            [
                "Variable, sometimes forget to eat",
                "Strong, get irritable when hungry",
                "Steady, can skip meals easily",
            ],
        ),
        (
            DIGESTION,
            "How is your digestion?",
            [
                "Irregular, gas, bloating",
                "Strong, quick, sometimes heartburn",
                "Slow, heavy feeling after eating",
            ],
        ),
        (
            SLEEP,
            "How do you sleep?",
            [
                "Light sleeper, restless, wake up tired",
                "Moderate sleep, wake up refreshed",
                "Deep sleeper, hard to wake up",
            ],
        ),
        (
            SLEEP,
            "What is your energy level like?",
            [
                "Comes in bursts, then fatigue",
                "Moderate, steady energy",
                "Steady, good endurance",
            ],
        ),
        (
            MENTAL,
            "How do you handle stress?",
            [
                "Become anxious, worried",
                "Become irritable, angry",
                "Remain calm, withdraw",
            ],
        ),
        (
            MENTAL,
            "How do you learn?",
            [
                "Quick to learn, quick to forget",
                "Moderate pace, good retention",
                "Slow to learn, excellent retention",
            ],
        ),
        (
            MENTAL,
            "What describes your personality?",
            [
                "Enthusiastic, creative, changeable",
                "Determined, focused, competitive",
                "Calm, steady, loyal",
            ],
        ),
        (
            WEATHER,
            "What weather do you prefer?",
            [
                "Warm, humid weather",
                "Cool, well-ventilated spaces",
                "Warm, dry weather",
            ],
        ),
    ];

    let questions = rows
        .into_iter()
        .map(|(group, prompt, texts)| Question {
            group: group.to_string(),
            prompt: prompt.to_string(),
            options: texts
                .into_iter()
                .zip(Category::ALL)
                .map(|(text, category)| QuestionOption::new(text, category, DEFAULT_WEIGHT))
                .collect(),
        })
        .collect();

    QuestionCatalog::new(
        "prakriti",
        "Prakriti Analysis",
        "Discover your Ayurvedic constitution",
        questions,
    )
    .unwrap_or_else(|e| unreachable!("built-in catalog is malformed: {e}"))
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Serialize, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    group: String,
    prompt: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlOption {
    text: String,
    category: String,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// Parse a single TOML file into a `QuestionCatalog`.
pub fn parse_catalog(path: &Path) -> Result<QuestionCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `QuestionCatalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<QuestionCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            let options = q
                .options
                .into_iter()
                .map(|o| {
                    let category: Category = o
                        .category
                        .parse()
                        .with_context(|| format!("question {}", index + 1))?;
                    Ok(QuestionOption::new(o.text, category, o.weight))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Question {
                group: q.group,
                prompt: q.prompt,
                options,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    QuestionCatalog::new(
        parsed.catalog.id,
        parsed.catalog.name,
        parsed.catalog.description,
        questions,
    )
    .with_context(|| format!("invalid catalog: {}", source_path.display()))
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<QuestionCatalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// Serialize a catalog in the file format `parse_catalog_str` reads.
pub fn to_toml(catalog: &QuestionCatalog) -> Result<String> {
    let file = TomlCatalogFile {
        catalog: TomlCatalogHeader {
            id: catalog.id().to_string(),
            name: catalog.name().to_string(),
            description: catalog.description().to_string(),
        },
        questions: catalog
            .questions()
            .iter()
            .map(|q| TomlQuestion {
                group: q.group.clone(),
                prompt: q.prompt.clone(),
                options: q
                    .options
                    .iter()
                    .map(|o| TomlOption {
                        text: o.text.clone(),
                        category: o.category.to_string(),
                        weight: o.weight,
                    })
                    .collect(),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to serialize catalog")
}

/// A non-fatal issue found in a catalog.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based question index, if the warning concerns one question.
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a structurally valid catalog for content problems.
pub fn validate_catalog(catalog: &QuestionCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "catalog has no questions and cannot be scored".into(),
        });
    }

    let mut seen_prompts = HashSet::new();
    for (index, question) in catalog.questions().iter().enumerate() {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(index),
                message: "prompt is empty".into(),
            });
        } else if !seen_prompts.insert(question.prompt.trim()) {
            warnings.push(ValidationWarning {
                question: Some(index),
                message: format!("duplicate prompt: {}", question.prompt.trim()),
            });
        }

        for option in &question.options {
            if option.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question: Some(index),
                    message: format!("{} option has no text", option.category),
                });
            }
            if option.weight == 0 {
                warnings.push(ValidationWarning {
                    question: Some(index),
                    message: format!("{} option has zero weight", option.category),
                });
            }
        }
    }

    warnings
}
