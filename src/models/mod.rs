mod plan;
mod profile;

pub use plan::{DayPlan, DietPlan, MealEntry, NutrientTargets, WeeklyPlan, Weekday};
pub use profile::{DietPreference, Lifestyle, ProfileForm, ProfileInput};
