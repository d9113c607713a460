use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};

/// Day of the week, in plan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Daily targets derived from weight, height and meal count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientTargets {
    pub bmi: f64,
    /// Liters per day.
    pub water_liters: f64,
    /// Grams per meal.
    pub protein_per_meal: f64,
    pub carbs_per_meal: f64,
    pub fats_per_meal: f64,
}

/// One meal slot within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub meal_name: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub suggestion: String,
}

impl MealEntry {
    /// Build the entry for 1-based meal `index`.
    pub fn new(index: u32, targets: &NutrientTargets, suggestion: &str) -> Self {
        Self {
            meal_name: format!("Meal {}", index),
            protein: format!("{:.1}g Protein", targets.protein_per_meal),
            carbs: format!("{:.1}g Carbs", targets.carbs_per_meal),
            fats: format!("{:.1}g Fats", targets.fats_per_meal),
            suggestion: suggestion.to_string(),
        }
    }

    /// Single line used by the terminal and PDF views.
    pub fn summary_line(&self) -> String {
        format!(
            "- {}: {} ({}, {}, {})",
            self.meal_name, self.suggestion, self.protein, self.carbs, self.fats
        )
    }
}

/// All meals for one weekday. Every meal shares the day's suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub meals: Vec<MealEntry>,
}

/// Seven days, Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Decode a serialized plan and check its shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: WeeklyPlan = serde_json::from_str(json).map_err(|e| {
            HealthError::MalformedPlan(format!("Error decoding JSON data: {}", e))
        })?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Exactly one entry per weekday in order, none of them empty.
    pub fn validate(&self) -> Result<()> {
        if self.days.len() != Weekday::ALL.len() {
            return Err(HealthError::MalformedPlan(format!(
                "expected 7 days, found {}",
                self.days.len()
            )));
        }

        for (day, expected) in self.days.iter().zip(Weekday::ALL) {
            if day.day != expected {
                return Err(HealthError::MalformedPlan(format!(
                    "expected {} but found {}",
                    expected, day.day
                )));
            }
            if day.meals.is_empty() {
                return Err(HealthError::MalformedPlan(format!("{} has no meals", day.day)));
            }
        }

        Ok(())
    }

    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }
}

/// Complete calculator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub targets: NutrientTargets,
    pub week: WeeklyPlan,
}
