pub mod prompts;
pub mod render;

pub use prompts::{
    collect_risk_features, complete_profile_form, prompt_password, prompt_text, value_or_prompt,
};
pub use render::{display_diet_plan, display_history, display_prediction};
