//! The `prakriti questions` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::PrakritiConfig;

pub fn execute(catalog_path: Option<PathBuf>, config: &PrakritiConfig) -> Result<()> {
    let catalog = super::resolve_catalog(catalog_path.as_deref(), config)?;

    println!("{} ({} questions)", catalog.name(), catalog.len());
    if !catalog.description().is_empty() {
        println!("{}", catalog.description());
    }

    let mut current_group: Option<&str> = None;
    for (index, question) in catalog.questions().iter().enumerate() {
        if current_group != Some(question.group.as_str()) {
            println!("\n{}", question.group);
            current_group = Some(question.group.as_str());
        }
        println!("  {}. {}", index + 1, question.prompt);
        for (option_index, option) in question.options.iter().enumerate() {
            println!("     {}) {}", option_index + 1, option.text);
        }
    }

    Ok(())
}
