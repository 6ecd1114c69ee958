//! The `prakriti init` command.

use std::path::Path;

use anyhow::{Context, Result};

use prakriti_core::catalog;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("prakriti.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("catalogs").context("failed to create catalogs/")?;
    let builtin = catalog::to_toml(catalog::builtin())?;
    write_if_absent(Path::new("catalogs/prakriti.toml"), &builtin)?;

    write_if_absent(Path::new("profile.toml"), SAMPLE_PROFILE)?;

    println!("\nNext steps:");
    println!("  1. Fill in profile.toml");
    println!("  2. Run: prakriti validate --catalog catalogs/prakriti.toml");
    println!("  3. Run: prakriti take");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# prakriti configuration

# Questionnaire used by `take`, `score` and `questions`.
catalog = "catalogs/prakriti.toml"

# Profile used for the greeting and BMI readout.
profile = "profile.toml"

# Save every result here as result-<timestamp>.json.
# output_dir = "results"
"#;

const SAMPLE_PROFILE: &str = r#"first_name = "Asha"
last_name = "Rao"
email = "asha@example.com"
age = 34
gender = "female"
height_cm = 165
weight_kg = 60

# Optional
activity_level = "moderately_active"
sleep_hours = 7
stress_level = "moderate"
diet_type = "vegetarian"
"#;
