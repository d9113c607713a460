use crate::models::DietPlan;
use crate::prediction::{PredictionRecord, RiskFeatures, RiskLabel};

/// Display the weekly plan with the daily targets.
pub fn display_diet_plan(plan: &DietPlan) {
    let targets = &plan.targets;

    println!();
    println!("=== Weekly Diet Plan ===");
    println!();
    println!("BMI: {:.2}", targets.bmi);
    println!("Recommended water intake: {} liters/day", targets.water_liters);
    println!(
        "Per meal: {:.1}g protein, {:.1}g carbs, {:.1}g fats",
        targets.protein_per_meal, targets.carbs_per_meal, targets.fats_per_meal
    );

    for day in &plan.week.days {
        println!();
        println!("{}:", day.day);
        for meal in &day.meals {
            println!("  {}", meal.summary_line());
        }
    }

    println!();
}

pub fn display_prediction(features: &RiskFeatures, label: &RiskLabel) {
    println!();
    println!(
        "Age {} | BMI {} | Glucose {} | Insulin {}",
        features.age, features.bmi, features.glucose, features.insulin
    );
    println!("Prediction: {}", label);
    println!();
}

/// Display recorded predictions, oldest first.
pub fn display_history(records: &[PredictionRecord]) {
    if records.is_empty() {
        println!("No predictions recorded yet.");
        return;
    }

    println!();
    println!("=== Prediction History ({} records) ===", records.len());
    println!();

    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>3}. {}  age {:>5} | bmi {:>5} | glucose {:>6} | insulin {:>6} => {}",
            i + 1,
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.age,
            record.bmi,
            record.glucose,
            record.insulin,
            record.result
        );
    }

    println!();
}
