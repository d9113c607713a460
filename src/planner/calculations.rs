use crate::models::NutrientTargets;
use crate::planner::constants::*;

/// Round to `decimals` places from the exact binary value, ties to even.
///
/// Scaling first can land on a spurious half: 9.45 is stored as 9.4499...,
/// but `9.45 * 10.0 == 94.5`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Body-mass index from kilograms and centimeters.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to(weight_kg / (height_m * height_m), BODY_METRIC_DECIMALS)
}

/// Recommended daily water intake in liters.
pub fn calculate_water_intake(weight_kg: f64) -> f64 {
    round_to(weight_kg * WATER_L_PER_KG, BODY_METRIC_DECIMALS)
}

/// Protein grams per meal.
pub fn protein_per_meal(weight_kg: f64, meals_per_day: u32) -> f64 {
    round_to(PROTEIN_G_PER_KG * weight_kg / meals_per_day as f64, MACRO_DECIMALS)
}

/// Carbohydrate grams per meal.
pub fn carbs_per_meal(weight_kg: f64, meals_per_day: u32) -> f64 {
    round_to((weight_kg * CARBS_G_PER_KG) / meals_per_day as f64, MACRO_DECIMALS)
}

/// Fat grams per meal.
pub fn fats_per_meal(weight_kg: f64, meals_per_day: u32) -> f64 {
    round_to((weight_kg * FATS_G_PER_KG) / meals_per_day as f64, MACRO_DECIMALS)
}

/// All targets at once. Callers validate inputs first.
pub fn calculate_targets(weight_kg: f64, height_cm: f64, meals_per_day: u32) -> NutrientTargets {
    NutrientTargets {
        bmi: calculate_bmi(weight_kg, height_cm),
        water_liters: calculate_water_intake(weight_kg),
        protein_per_meal: protein_per_meal(weight_kg, meals_per_day),
        carbs_per_meal: carbs_per_meal(weight_kg, meals_per_day),
        fats_per_meal: fats_per_meal(weight_kg, meals_per_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(22.857142, 2), 22.86);
        assert_eq!(round_to(18.666666, 1), 18.7);
        assert_eq!(round_to(9.333333, 1), 9.3);
        assert_eq!(round_to(-1.25, 1), -1.2);
        assert_eq!(round_to(0.35, 1), 0.3);
    }

    #[test]
    fn test_round_to_uses_stored_value() {
        // 9.45 and 2.675 sit just below the half in binary
        assert_eq!(round_to(31.5 * 1.2 / 4.0, 1), 9.4);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(42.5 * 0.4 / 4.0, 1), 4.2);
    }

    #[test]
    fn test_bmi() {
        assert!((calculate_bmi(70.0, 175.0) - 22.86).abs() < 1e-9);
        assert!((calculate_bmi(100.0, 200.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_intake() {
        assert!((calculate_water_intake(70.0) - 2.31).abs() < 1e-9);
        assert!((calculate_water_intake(50.0) - 1.65).abs() < 1e-9);
    }

    #[test]
    fn test_macros_split_evenly() {
        assert!((protein_per_meal(70.0, 3) - 18.7).abs() < 1e-9);
        assert!((carbs_per_meal(70.0, 3) - 28.0).abs() < 1e-9);
        assert!((fats_per_meal(70.0, 3) - 9.3).abs() < 1e-9);

        // One meal gets the whole daily amount
        assert!((protein_per_meal(80.0, 1) - 64.0).abs() < 1e-9);
        assert!((carbs_per_meal(80.0, 1) - 96.0).abs() < 1e-9);
        assert!((fats_per_meal(80.0, 1) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_targets() {
        let targets = calculate_targets(70.0, 175.0, 3);
        assert!((targets.bmi - 22.86).abs() < 1e-9);
        assert!((targets.water_liters - 2.31).abs() < 1e-9);
        assert!((targets.protein_per_meal - 18.7).abs() < 1e-9);
    }
}
