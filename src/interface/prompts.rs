use dialoguer::{Input, Password, Select};

use crate::error::{HealthError, Result};
use crate::models::{DietPreference, Lifestyle, ProfileForm};
use crate::prediction::RiskFeatures;

/// Prompt for a line of text.
pub fn prompt_text(prompt: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(input.trim().to_string())
}

/// Use the given value, or prompt for it when absent.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_text(prompt),
    }
}

/// Prompt for a password, optionally asking twice.
pub fn prompt_password(confirm: bool) -> Result<String> {
    let mut password = Password::new().with_prompt("Password");
    if confirm {
        password = password.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(password.interact()?)
}

fn select_label(prompt: &str, labels: &[&str]) -> Result<String> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact()?;
    Ok(labels[selection].to_string())
}

/// Fill every missing field of a diet form interactively.
pub fn complete_profile_form(form: ProfileForm) -> Result<ProfileForm> {
    let lifestyle = match form.lifestyle {
        Some(l) => l,
        None => {
            let options = Lifestyle::ALL;
            let labels: Vec<&str> = options.iter().map(|l| l.label()).collect();
            select_label("Lifestyle", &labels)?
        }
    };

    let meal_preference = match form.meal_preference {
        Some(p) => p,
        None => {
            let labels: Vec<&str> = DietPreference::ALL.iter().map(|p| p.label()).collect();
            select_label("Meal preference", &labels)?
        }
    };

    Ok(ProfileForm {
        age: Some(value_or_prompt(form.age, "Age")?),
        lifestyle: Some(lifestyle),
        meal_preference: Some(meal_preference),
        meals_per_day: Some(value_or_prompt(form.meals_per_day, "Meals per day")?),
        weight: Some(value_or_prompt(form.weight, "Weight (kg)")?),
        height: Some(value_or_prompt(form.height, "Height (cm)")?),
    })
}

/// Collect the four risk inputs, prompting for missing ones.
pub fn collect_risk_features(
    age: Option<String>,
    bmi: Option<String>,
    glucose: Option<String>,
    insulin: Option<String>,
) -> Result<RiskFeatures> {
    let age = parse_number(&value_or_prompt(age, "Age")?)?;
    let bmi = parse_number(&value_or_prompt(bmi, "BMI")?)?;
    let glucose = parse_number(&value_or_prompt(glucose, "Glucose level")?)?;
    let insulin = parse_number(&value_or_prompt(insulin, "Insulin level")?)?;

    RiskFeatures::new(age, bmi, glucose, insulin)
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| HealthError::InvalidInput("Please enter valid numerical values".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_without_prompting() {
        let features = collect_risk_features(
            Some("50".to_string()),
            Some("31.2".to_string()),
            Some("148".to_string()),
            Some("0".to_string()),
        )
        .unwrap();
        assert_eq!(features.as_array(), [50.0, 31.2, 148.0, 0.0]);
    }

    #[test]
    fn test_collect_rejects_text_and_negatives() {
        let text = collect_risk_features(
            Some("fifty".to_string()),
            Some("31".to_string()),
            Some("148".to_string()),
            Some("0".to_string()),
        );
        assert!(matches!(text, Err(HealthError::InvalidInput(_))));

        let negative = collect_risk_features(
            Some("50".to_string()),
            Some("31".to_string()),
            Some("-148".to_string()),
            Some("0".to_string()),
        );
        assert!(matches!(negative, Err(HealthError::InvalidInput(_))));
    }

    #[test]
    fn test_select_labels_parse_back() {
        for lifestyle in Lifestyle::ALL {
            assert_eq!(lifestyle.label().parse::<Lifestyle>().unwrap(), lifestyle);
        }
        for preference in DietPreference::ALL {
            assert_eq!(preference.label().parse::<DietPreference>().unwrap(), preference);
        }
    }
}
