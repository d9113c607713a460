pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod interface;
pub mod models;
pub mod planner;
pub mod prediction;
pub mod state;

pub use error::{HealthError, Result};
pub use models::{DietPlan, ProfileInput, WeeklyPlan};
pub use planner::generate_plan;
