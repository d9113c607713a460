use crate::error::Result;
use crate::models::{DayPlan, DietPlan, MealEntry, ProfileInput, WeeklyPlan, Weekday};
use crate::planner::calculations::calculate_targets;
use crate::planner::constants::meal_suggestions;

/// Generate the weekly diet plan for a profile.
///
/// Pure and deterministic: the same profile always yields the same plan.
/// Weekday `i` gets dish `i` of the preference's list, repeated in every
/// meal slot of that day.
pub fn generate_plan(profile: &ProfileInput) -> Result<DietPlan> {
    profile.validate()?;

    let targets = calculate_targets(profile.weight_kg, profile.height_cm, profile.meals_per_day);
    let suggestions = meal_suggestions(profile.preference);

    let days = Weekday::ALL
        .iter()
        .zip(suggestions.iter())
        .map(|(&day, suggestion)| DayPlan {
            day,
            meals: (1..=profile.meals_per_day)
                .map(|index| MealEntry::new(index, &targets, suggestion))
                .collect(),
        })
        .collect();

    Ok(DietPlan {
        targets,
        week: WeeklyPlan { days },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthError;
    use crate::models::{DietPreference, Lifestyle};
    use crate::planner::constants::NON_VEGETARIAN_MEALS;

    fn profile(meals: u32, preference: DietPreference) -> ProfileInput {
        ProfileInput {
            age: 40,
            lifestyle: Lifestyle::Sedentary,
            preference,
            meals_per_day: meals,
            weight_kg: 82.5,
            height_cm: 180.0,
        }
    }

    #[test]
    fn test_non_vegetarian_days_follow_list() {
        let plan = generate_plan(&profile(2, DietPreference::NonVegetarian)).unwrap();
        for (day, dish) in plan.week.days.iter().zip(NON_VEGETARIAN_MEALS) {
            assert!(day.meals.iter().all(|m| m.suggestion == dish));
        }
    }

    #[test]
    fn test_meal_labels_are_one_based() {
        let plan = generate_plan(&profile(4, DietPreference::Vegetarian)).unwrap();
        let labels: Vec<&str> = plan.week.days[0]
            .meals
            .iter()
            .map(|m| m.meal_name.as_str())
            .collect();
        assert_eq!(labels, ["Meal 1", "Meal 2", "Meal 3", "Meal 4"]);
    }

    #[test]
    fn test_plan_passes_its_own_validation() {
        let plan = generate_plan(&profile(1, DietPreference::Vegetarian)).unwrap();
        assert!(plan.week.validate().is_ok());
    }

    #[test]
    fn test_invalid_profile_produces_no_plan() {
        let mut bad = profile(3, DietPreference::Vegetarian);
        bad.height_cm = -170.0;
        assert!(matches!(generate_plan(&bad), Err(HealthError::InvalidInput(_))));
    }
}
