pub mod calculations;
pub mod constants;
pub mod schedule;

pub use calculations::{
    calculate_bmi, calculate_targets, calculate_water_intake, carbs_per_meal, fats_per_meal,
    protein_per_meal, round_to,
};
pub use constants::*;
pub use schedule::generate_plan;
