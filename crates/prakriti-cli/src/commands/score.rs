//! The `prakriti score` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use prakriti_core::engine::score_questionnaire;
use prakriti_core::model::AnswerSet;

use super::OutputFormat;
use crate::config::PrakritiConfig;

/// An answers file: `answers = [0, 2, 1, ...]`, one option index per question.
#[derive(Debug, Deserialize)]
struct AnswersFile {
    answers: Vec<usize>,
}

pub fn execute(
    answers: Option<String>,
    answers_file: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: &PrakritiConfig,
) -> Result<()> {
    let choices = match (answers, answers_file) {
        (Some(list), None) => parse_answer_list(&list)?,
        (None, Some(path)) => load_answers_file(&path)?,
        (Some(_), Some(_)) => anyhow::bail!("use either --answers or --answers-file, not both"),
        (None, None) => anyhow::bail!("no answers given, use --answers or --answers-file"),
    };

    let catalog = super::resolve_catalog(catalog_path.as_deref(), config)?;
    let profile = super::resolve_profile(profile_path.as_deref(), config)?;

    let answers = AnswerSet::from_choices(choices);
    let result = score_questionnaire(&catalog, &answers).map_err(super::explain)?;

    super::print_result(&result, profile.as_ref(), format)?;
    if let Some(path) = super::save_result(&result, output.as_deref(), config)? {
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}

/// Parse `"0,2,1"` into option indices.
///
/// Entries are positional, so an empty slot is an error. One trailing comma
/// is allowed.
fn parse_answer_list(list: &str) -> Result<Vec<usize>> {
    let list = list.trim();
    let list = list.strip_suffix(',').unwrap_or(list);
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, s)| {
            if s.is_empty() {
                anyhow::bail!("answer {} is empty", i + 1);
            }
            s.parse::<usize>()
                .with_context(|| format!("answer {} is not an option index: {s:?}", i + 1))
        })
        .collect()
}

fn load_answers_file(path: &Path) -> Result<Vec<usize>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let file: AnswersFile = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("failed to parse answers TOML: {}", path.display()))?
    };
    Ok(file.answers)
}
