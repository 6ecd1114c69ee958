//! User profile data and body-mass-index bucketing.
//!
//! The engine never reads the profile. The shell uses it for greetings and
//! the BMI readout next to a result.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Demographic and lifestyle details entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres.
    pub height_cm: f64,
    /// Weight in kilograms.
    pub weight_kg: f64,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub exercise_frequency: Option<ExerciseFrequency>,
    #[serde(default)]
    pub stress_level: Option<StressLevel>,
    #[serde(default)]
    pub diet_type: Option<DietType>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Option<String>,
    #[serde(default)]
    pub family_history: Option<String>,
    #[serde(default)]
    pub smoker: bool,
    #[serde(default)]
    pub alcohol_consumption: Option<AlcoholConsumption>,
    /// Daily water intake in litres.
    #[serde(default)]
    pub water_intake_litres: Option<f64>,
    #[serde(default)]
    pub mental_health_concerns: Option<String>,
}

impl UserProfile {
    /// Load a profile from a `.json` file, or TOML for any other extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse profile JSON: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("failed to parse profile TOML: {}", path.display()))
        }
    }

    /// The name used in greetings.
    pub fn display_name(&self) -> &str {
        self.first_name.trim()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Upper-cased first letters of the first and last name.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::compute(self.weight_kg, self.height_cm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    ModeratelyActive,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseFrequency {
    Never,
    Rarely,
    Sometimes,
    Regularly,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    NonVegetarian,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholConsumption {
    Never,
    Rarely,
    Occasionally,
    Regularly,
}

/// Weight band for a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Band for a BMI value. Each bound is exclusive.
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Body-mass index rounded to one decimal place, with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    /// `weight / (height in metres)^2`, or `None` if either input is not
    /// positive. The band is chosen from the rounded value.
    pub fn compute(weight_kg: f64, height_cm: f64) -> Option<Self> {
        if !(weight_kg > 0.0 && height_cm > 0.0) {
            return None;
        }
        let height_m = height_cm / 100.0;
        let value = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;
        Some(Self {
            value,
            category: BmiCategory::from_value(value),
        })
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.value, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            first_name: "Asha".into(),
            last_name: "rao".into(),
            email: "asha@example.com".into(),
            age: 34,
            gender: Gender::Female,
            height_cm: 175.0,
            weight_kg: 70.0,
            occupation: None,
            activity_level: Some(ActivityLevel::ModeratelyActive),
            sleep_hours: Some(7.5),
            exercise_frequency: None,
            stress_level: Some(StressLevel::VeryHigh),
            diet_type: None,
            allergies: None,
            medications: None,
            chronic_conditions: None,
            family_history: None,
            smoker: false,
            alcohol_consumption: None,
            water_intake_litres: None,
            mental_health_concerns: None,
        }
    }

    #[test]
    fn bmi_for_seventy_kg_at_175_cm() {
        let bmi = Bmi::compute(70.0, 175.0).unwrap();
        assert_eq!(bmi.value, 22.9);
        assert_eq!(bmi.category, BmiCategory::Normal);
        assert_eq!(bmi.to_string(), "22.9 (Normal)");
    }

    #[test]
    fn bmi_needs_positive_inputs() {
        assert!(Bmi::compute(70.0, 0.0).is_none());
        assert!(Bmi::compute(0.0, 175.0).is_none());
        assert!(Bmi::compute(f64::NAN, 175.0).is_none());
    }

    #[test]
    fn bmi_band_bounds_are_exclusive() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn band_uses_rounded_value() {
        // 18.49 rounds to 18.5, which is Normal.
        let bmi = Bmi::compute(18.49, 100.0).unwrap();
        assert_eq!(bmi.value, 18.5);
        assert_eq!(bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn names_and_initials() {
        let p = profile();
        assert_eq!(p.display_name(), "Asha");
        assert_eq!(p.full_name(), "Asha rao");
        assert_eq!(p.initials(), "AR");
        assert_eq!(p.bmi().unwrap().category, BmiCategory::Normal);
    }

    #[test]
    fn profile_from_toml_with_optional_fields_missing() {
        let toml = r#"
first_name = "Ravi"
last_name = "Kumar"
email = "ravi@example.com"
age = 41
gender = "male"
height_cm = 168
weight_kg = 75
diet_type = "non_vegetarian"
"#;
        let p: UserProfile = toml::from_str(toml).unwrap();
        assert_eq!(p.gender, Gender::Male);
        assert_eq!(p.diet_type, Some(DietType::NonVegetarian));
        assert!(p.activity_level.is_none());
        assert!(!p.smoker);
        assert_eq!(p.bmi().unwrap().category, BmiCategory::Overweight);
    }

    #[test]
    fn load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("profile.json");
        std::fs::write(&json_path, serde_json::to_string(&profile()).unwrap()).unwrap();
        assert_eq!(UserProfile::load(&json_path).unwrap(), profile());

        let toml_path = dir.path().join("profile.toml");
        std::fs::write(&toml_path, toml::to_string(&profile()).unwrap()).unwrap();
        assert_eq!(UserProfile::load(&toml_path).unwrap().initials(), "AR");

        let err = UserProfile::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read profile"));
    }
}
