use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{HealthError, Result};

/// Minimum Jaro-Winkler score for a typo to resolve to a known tag.
const FUZZY_MATCH_THRESHOLD: f64 = 0.9;

/// Self-reported activity level. Accepted with the profile but not used by
/// the plan calculation, so unrecognised text is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    Other(String),
}

impl Lifestyle {
    pub const ALL: [Lifestyle; 4] = [
        Lifestyle::Sedentary,
        Lifestyle::LightlyActive,
        Lifestyle::ModeratelyActive,
        Lifestyle::VeryActive,
    ];

    pub fn label(&self) -> &str {
        match self {
            Lifestyle::Sedentary => "Sedentary",
            Lifestyle::LightlyActive => "Lightly active",
            Lifestyle::ModeratelyActive => "Moderately active",
            Lifestyle::VeryActive => "Very active",
            Lifestyle::Other(text) => text.as_str(),
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Lifestyle::Sedentary => &["sedentary", "inactive"],
            Lifestyle::LightlyActive => &["lightlyactive", "light", "lightly"],
            Lifestyle::ModeratelyActive => &["moderatelyactive", "moderate", "moderately"],
            Lifestyle::VeryActive => &["veryactive", "active", "heavy"],
            Lifestyle::Other(_) => &[],
        }
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Lifestyle {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(HealthError::InvalidInput("Lifestyle is empty".to_string()));
        }
        Ok(resolve_tag(text, &Lifestyle::ALL, |l| l.aliases())
            .unwrap_or_else(|| Lifestyle::Other(text.to_string())))
    }
}

/// Dietary preference selecting the dish list for the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
}

impl DietPreference {
    pub const ALL: [DietPreference; 2] = [DietPreference::Vegetarian, DietPreference::NonVegetarian];

    pub fn label(&self) -> &'static str {
        match self {
            DietPreference::Vegetarian => "Vegetarian",
            DietPreference::NonVegetarian => "Non-vegetarian",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            DietPreference::Vegetarian => &["vegetarian", "veg", "veggie"],
            DietPreference::NonVegetarian => &["nonvegetarian", "nonveg", "meat"],
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietPreference {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_tag(s, &DietPreference::ALL, |p| p.aliases()).ok_or_else(|| {
            HealthError::InvalidInput(format!("Unknown meal preference '{}'", s.trim()))
        })
    }
}

/// Lowercase and strip separators so "Non-Vegetarian", "non vegetarian" and
/// "non_vegetarian" compare equal.
fn normalize_tag(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve free text to one of `candidates`: exact alias first, then the
/// single best fuzzy match above the threshold.
fn resolve_tag<T: Clone>(
    input: &str,
    candidates: &[T],
    aliases: impl Fn(&T) -> &'static [&'static str],
) -> Option<T> {
    let needle = normalize_tag(input);
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = candidates
        .iter()
        .find(|c| aliases(*c).iter().any(|a| *a == needle))
    {
        return Some(exact.clone());
    }

    let mut best: Option<(T, f64)> = None;
    for candidate in candidates {
        for alias in aliases(candidate) {
            let score = jaro_winkler(alias, &needle);
            if score >= FUZZY_MATCH_THRESHOLD && best.as_ref().is_none_or(|(_, s)| score > *s) {
                best = Some((candidate.clone(), score));
            }
        }
    }

    best.map(|(c, _)| c)
}

/// Validated profile fed to the plan calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub age: u32,
    pub lifestyle: Lifestyle,
    pub preference: DietPreference,
    pub meals_per_day: u32,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimeters.
    pub height_cm: f64,
}

impl ProfileInput {
    /// Check the invariants the plan arithmetic divides by.
    pub fn validate(&self) -> Result<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(HealthError::InvalidInput(
                "Weight must be a positive number".to_string(),
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(HealthError::InvalidInput(
                "Height must be a positive number".to_string(),
            ));
        }
        if self.meals_per_day == 0 {
            return Err(HealthError::InvalidInput(
                "Meals per day must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Raw diet form as submitted: every field is optional text.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub age: Option<String>,
    pub lifestyle: Option<String>,
    pub meal_preference: Option<String>,
    pub meals_per_day: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
}

impl ProfileForm {
    /// Parse and validate every field before any arithmetic is attempted.
    pub fn parse(&self) -> Result<ProfileInput> {
        let profile = ProfileInput {
            age: parse_field(&self.age, "age")?,
            lifestyle: required(&self.lifestyle, "lifestyle")?.parse()?,
            preference: required(&self.meal_preference, "meal_preference")?.parse()?,
            meals_per_day: parse_field(&self.meals_per_day, "meals_per_day")?,
            weight_kg: parse_field(&self.weight, "weight")?,
            height_cm: parse_field(&self.height, "height")?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HealthError::InvalidInput(format!("Missing field '{}'", field)))
}

fn parse_field<T: FromStr>(value: &Option<String>, field: &str) -> Result<T> {
    let raw = required(value, field)?;
    raw.parse().map_err(|_| {
        HealthError::InvalidInput(format!("Field '{}' is not a valid number: '{}'", field, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ProfileForm {
        ProfileForm {
            age: Some("34".to_string()),
            lifestyle: Some("moderate".to_string()),
            meal_preference: Some("veg".to_string()),
            meals_per_day: Some("3".to_string()),
            weight: Some("70".to_string()),
            height: Some("175".to_string()),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let profile = sample_form().parse().unwrap();
        assert_eq!(profile.age, 34);
        assert_eq!(profile.lifestyle, Lifestyle::ModeratelyActive);
        assert_eq!(profile.preference, DietPreference::Vegetarian);
        assert_eq!(profile.meals_per_day, 3);
    }

    #[test]
    fn test_preference_aliases() {
        assert_eq!(
            "Non-Vegetarian".parse::<DietPreference>().unwrap(),
            DietPreference::NonVegetarian
        );
        assert_eq!(
            "nonveg".parse::<DietPreference>().unwrap(),
            DietPreference::NonVegetarian
        );
        assert_eq!(
            "VEGETARIAN".parse::<DietPreference>().unwrap(),
            DietPreference::Vegetarian
        );
    }

    #[test]
    fn test_preference_typo_resolves() {
        assert_eq!(
            "vegetarain".parse::<DietPreference>().unwrap(),
            DietPreference::Vegetarian
        );
    }

    #[test]
    fn test_unknown_preference_rejected() {
        assert!("pescatarian-ish".parse::<DietPreference>().is_err());
        assert!("".parse::<Lifestyle>().is_err());
    }

    #[test]
    fn test_unknown_lifestyle_kept() {
        assert_eq!(
            " shift worker ".parse::<Lifestyle>().unwrap(),
            Lifestyle::Other("shift worker".to_string())
        );
        assert_eq!("moderatly".parse::<Lifestyle>().unwrap(), Lifestyle::ModeratelyActive);

        let mut form = sample_form();
        form.lifestyle = Some("marathon training".to_string());
        let profile = form.parse().unwrap();
        assert_eq!(profile.lifestyle.label(), "marathon training");
    }

    #[test]
    fn test_non_numeric_weight_rejected() {
        let mut form = sample_form();
        form.weight = Some("seventy".to_string());
        let err = form.parse().unwrap_err();
        assert!(matches!(err, HealthError::InvalidInput(msg) if msg.contains("weight")));
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut form = sample_form();
        form.height = None;
        assert!(matches!(form.parse(), Err(HealthError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_meals_rejected() {
        let mut form = sample_form();
        form.meals_per_day = Some("0".to_string());
        assert!(matches!(form.parse(), Err(HealthError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_age_rejected_as_non_numeric() {
        let mut form = sample_form();
        form.age = Some("-4".to_string());
        assert!(form.parse().is_err());
    }
}
