use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// health_diet: weekly diet plans, diabetes risk prediction and PDF export.
#[derive(Parser, Debug)]
#[command(name = "health_diet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding users, the session and the prediction log.
    #[arg(long, env = "HEALTH_DIET_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Path to the pre-trained risk model (JSON).
    ///
    /// Format: {"labels": [...], "trees": [{"nodes": [...]}]}. Node 0 is the
    /// root; a split is {"feature", "threshold", "left", "right"} with features
    /// 0=age 1=bmi 2=glucose 3=insulin and children at later indices, a leaf is
    /// {"class": index into labels}. data/risk_model.json is a small sample.
    #[arg(long, env = "HEALTH_DIET_MODEL", default_value = "data/risk_model.json")]
    pub model: PathBuf,

    /// bcrypt work factor for new passwords.
    #[arg(long, env = "HEALTH_DIET_BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Register {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Log in and keep the session for later commands.
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Forget the current session.
    Logout,

    /// Show who is logged in.
    Whoami,

    /// Generate a weekly diet plan. Missing fields are prompted for.
    Diet {
        #[arg(long)]
        age: Option<String>,

        /// sedentary, light, moderate or active.
        #[arg(long)]
        lifestyle: Option<String>,

        /// vegetarian or non-vegetarian.
        #[arg(long)]
        preference: Option<String>,

        #[arg(long)]
        meals_per_day: Option<String>,

        /// Weight in kilograms.
        #[arg(long)]
        weight: Option<String>,

        /// Height in centimeters.
        #[arg(long)]
        height: Option<String>,

        /// Write the plan as JSON for a later `export`.
        #[arg(long)]
        save_plan: Option<PathBuf>,

        /// Also write the plan as a PDF.
        #[arg(long)]
        pdf: Option<PathBuf>,
    },

    /// Render a saved plan as a PDF.
    Export {
        /// JSON plan written by `diet --save-plan`.
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Daily water intake in liters.
        #[arg(long)]
        water_intake: Option<String>,

        /// Output PDF path.
        #[arg(short, long, default_value = "Weekly_Diet_Plan.pdf")]
        out: PathBuf,
    },

    /// Predict diabetes risk. Missing values are prompted for.
    Predict {
        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        bmi: Option<String>,

        #[arg(long)]
        glucose: Option<String>,

        #[arg(long)]
        insulin: Option<String>,
    },

    /// List recorded predictions.
    History {
        /// Copy the records to this CSV file instead of printing them.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}
