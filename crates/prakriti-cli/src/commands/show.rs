//! The `prakriti show` command.

use std::path::PathBuf;

use anyhow::Result;

use prakriti_core::report::ClassificationResult;

use super::OutputFormat;
use crate::config::PrakritiConfig;

pub fn execute(
    result_path: PathBuf,
    profile_path: Option<PathBuf>,
    format: OutputFormat,
    config: &PrakritiConfig,
) -> Result<()> {
    let result = ClassificationResult::load_json(&result_path)?;
    let profile = super::resolve_profile(profile_path.as_deref(), config)?;
    super::print_result(&result, profile.as_ref(), format)
}
