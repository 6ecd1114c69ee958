//! Subcommands and the helpers they share.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use prakriti_core::catalog;
use prakriti_core::error::ScoringError;
use prakriti_core::model::QuestionCatalog;
use prakriti_core::profile::UserProfile;
use prakriti_core::report::ClassificationResult;

use crate::config::PrakritiConfig;
use crate::presentation::style;

pub mod bmi;
pub mod init;
pub mod questions;
pub mod score;
pub mod show;
pub mod take;
pub mod validate;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The catalog named on the command line, else in config, else the built-in.
pub fn resolve_catalog(
    flag: Option<&Path>,
    config: &PrakritiConfig,
) -> Result<Cow<'static, QuestionCatalog>> {
    match flag.or(config.catalog.as_deref()) {
        Some(path) => {
            tracing::debug!("using catalog {}", path.display());
            Ok(Cow::Owned(catalog::parse_catalog(path)?))
        }
        None => Ok(Cow::Borrowed(catalog::builtin())),
    }
}

/// The profile named on the command line, else in config, if any.
pub fn resolve_profile(
    flag: Option<&Path>,
    config: &PrakritiConfig,
) -> Result<Option<UserProfile>> {
    flag.or(config.profile.as_deref())
        .map(UserProfile::load)
        .transpose()
}

/// Turn a scoring failure into guidance for the person at the terminal.
pub fn explain(err: ScoringError) -> anyhow::Error {
    match &err {
        ScoringError::IncompleteAnswerSet { missing } => {
            let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
            anyhow::anyhow!(
                "please answer all questions (unanswered: {})",
                numbers.join(", ")
            )
        }
        ScoringError::ZeroTotalScore => {
            anyhow::Error::new(err).context("the catalog cannot produce a score, check its weights")
        }
        _ => anyhow::Error::new(err),
    }
}

/// Save `result` to an explicit path (a `.json` file or a directory), or to
/// the configured output directory. Returns where it was written.
pub fn save_result(
    result: &ClassificationResult,
    output: Option<&Path>,
    config: &PrakritiConfig,
) -> Result<Option<PathBuf>> {
    let Some(target) = output.or(config.output_dir.as_deref()) else {
        return Ok(None);
    };

    let path = if target.extension().is_some_and(|ext| ext == "json") {
        target.to_path_buf()
    } else {
        let timestamp = result.completed_at.format("%Y-%m-%dT%H%M%S");
        target.join(format!("result-{timestamp}.json"))
    };
    result.save_json(&path)?;
    Ok(Some(path))
}

/// Print a result in the requested format.
pub fn print_result(
    result: &ClassificationResult,
    profile: Option<&UserProfile>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => print_text(result, profile),
    }
    Ok(())
}

fn print_text(result: &ClassificationResult, profile: Option<&UserProfile>) {
    let primary = result.primary_category;

    println!("Your Prakriti Results");
    match profile {
        Some(p) if !p.display_name().is_empty() => println!(
            "{}, your constitution is: {}",
            p.display_name(),
            result.constitution_label
        ),
        _ => println!("Your constitution is: {}", result.constitution_label),
    }
    println!("Primary dosha: {}", primary.as_str().to_uppercase());

    let mut table = Table::new();
    table.set_header(vec!["Dosha", "Score", "Share", "Element"]);
    for (category, &percent) in result.percentages.iter() {
        let s = style(category);
        table.add_row(vec![
            Cell::new(category.as_str().to_uppercase()).fg(s.color),
            Cell::new(result.scores[category]),
            Cell::new(format!("{percent}%")),
            Cell::new(s.element),
        ]);
    }
    println!("\n{table}");

    let s = style(primary);
    println!("\nAbout your primary dosha: {}", primary.as_str().to_uppercase());
    println!("  Qualities:       {}", s.qualities);
    println!("  Characteristics: {}", s.characteristics);
    println!("  When imbalanced: {}", s.imbalance);

    println!("\nRecommendations");
    println!("  Diet:                {}", result.recommendation.diet);
    println!("  Lifestyle:           {}", result.recommendation.lifestyle);
    println!("  Herbs & Supplements: {}", result.recommendation.herb_support);

    if let Some(bmi) = profile.and_then(UserProfile::bmi) {
        println!("\nBMI: {bmi}");
    }

    println!(
        "\nCompleted {}",
        result.completed_at.format("%Y-%m-%d %H:%M UTC")
    );
}
