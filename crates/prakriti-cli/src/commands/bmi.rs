//! The `prakriti bmi` command.

use anyhow::Result;

use prakriti_core::profile::Bmi;

pub fn execute(weight_kg: f64, height_cm: f64) -> Result<()> {
    let Some(bmi) = Bmi::compute(weight_kg, height_cm) else {
        anyhow::bail!("weight and height must both be positive");
    };
    println!("BMI: {:.1}", bmi.value);
    println!("Category: {}", bmi.category);
    Ok(())
}
