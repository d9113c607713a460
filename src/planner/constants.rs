use crate::models::DietPreference;

/// Protein grams per kilogram of body weight per day.
pub const PROTEIN_G_PER_KG: f64 = 0.8;

/// Carbohydrate grams per kilogram of body weight per day.
pub const CARBS_G_PER_KG: f64 = 1.2;

/// Fat grams per kilogram of body weight per day.
pub const FATS_G_PER_KG: f64 = 0.4;

/// Liters of water per kilogram of body weight per day.
pub const WATER_L_PER_KG: f64 = 0.033;

/// Decimal places kept for BMI and water intake.
pub const BODY_METRIC_DECIMALS: u32 = 2;

/// Decimal places kept for per-meal macronutrients.
pub const MACRO_DECIMALS: u32 = 1;

/// Dish suggestions for a vegetarian week, Monday first.
pub const VEGETARIAN_MEALS: [&str; 7] = [
    "Quinoa salad with roasted vegetables and nuts",
    "Lentil soup with whole-grain bread",
    "Vegetable stir-fry with tofu and rice",
    "Avocado toast with chia seeds and fruit",
    "Spinach and chickpea curry with naan bread",
    "Stuffed bell peppers with black beans and quinoa",
    "Mushroom risotto with asparagus and Parmesan cheese",
];

/// Dish suggestions for a non-vegetarian week, Monday first.
pub const NON_VEGETARIAN_MEALS: [&str; 7] = [
    "Grilled chicken with sweet potatoes and broccoli",
    "Salmon with wild rice and green beans",
    "Turkey wrap with hummus and mixed greens",
    "Egg omelette with whole-grain toast and avocado",
    "Beef stir-fry with rice noodles and vegetables",
    "Shrimp tacos with salsa and a side of coleslaw",
    "Baked cod with quinoa and roasted brussels sprouts",
];

/// Weekly dish list for a preference.
pub fn meal_suggestions(preference: DietPreference) -> &'static [&'static str; 7] {
    match preference {
        DietPreference::Vegetarian => &VEGETARIAN_MEALS,
        DietPreference::NonVegetarian => &NON_VEGETARIAN_MEALS,
    }
}
