use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use health_diet_rs::auth::{JsonCredentialStore, SessionStore};
use health_diet_rs::cli::{Cli, Command};
use health_diet_rs::config::AppConfig;
use health_diet_rs::error::Result;
use health_diet_rs::export::{ExportForm, PdfRenderer, export_diet_plan};
use health_diet_rs::handlers;
use health_diet_rs::interface::{
    collect_risk_features, complete_profile_form, display_diet_plan, display_history,
    display_prediction, prompt_password, value_or_prompt,
};
use health_diet_rs::models::ProfileForm;
use health_diet_rs::prediction::{CsvPredictionLog, ForestModel, write_history_csv};
use health_diet_rs::state::write_atomic;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "health_diet_rs=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        let code = if e.is_client_error() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(&cli.data_dir, &cli.model).with_bcrypt_cost(cli.bcrypt_cost);
    config.ensure_data_dir()?;

    let sessions = SessionStore::new(config.session_path());

    match cli.command {
        Command::Register { username } => cmd_register(&config, username),
        Command::Login { username } => cmd_login(&config, &sessions, username),
        Command::Logout => cmd_logout(&sessions),
        Command::Whoami => cmd_whoami(&sessions),
        Command::Diet {
            age,
            lifestyle,
            preference,
            meals_per_day,
            weight,
            height,
            save_plan,
            pdf,
        } => {
            let form = ProfileForm {
                age,
                lifestyle,
                meal_preference: preference,
                meals_per_day,
                weight,
                height,
            };
            cmd_diet(&sessions, form, save_plan.as_deref(), pdf.as_deref())
        }
        Command::Export {
            plan,
            water_intake,
            out,
        } => cmd_export(&sessions, plan.as_deref(), water_intake, &out),
        Command::Predict {
            age,
            bmi,
            glucose,
            insulin,
        } => cmd_predict(&config, age, bmi, glucose, insulin),
        Command::History { csv } => cmd_history(&config, csv),
    }
}

fn cmd_register(config: &AppConfig, username: Option<String>) -> Result<()> {
    let mut store = JsonCredentialStore::open(config.users_path(), config.bcrypt_cost)?;
    let username = value_or_prompt(username, "Username")?;
    let password = prompt_password(true)?;

    handlers::register(&mut store, &username, &password)?;
    println!("Registration successful! Please log in.");
    Ok(())
}

fn cmd_login(config: &AppConfig, sessions: &SessionStore, username: Option<String>) -> Result<()> {
    let store = JsonCredentialStore::open(config.users_path(), config.bcrypt_cost)?;
    let username = value_or_prompt(username, "Username")?;
    let password = prompt_password(false)?;

    let session = handlers::login(&store, sessions, &username, &password)?;
    println!("Login successful! Welcome, {}.", session.username);
    Ok(())
}

fn cmd_logout(sessions: &SessionStore) -> Result<()> {
    match handlers::logout(sessions)? {
        Some(_) => println!("Logged out successfully."),
        None => println!("No user was logged in."),
    }
    Ok(())
}

fn cmd_whoami(sessions: &SessionStore) -> Result<()> {
    let session = sessions.require()?;
    println!(
        "Logged in as {} since {}",
        session.username,
        session.issued_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn cmd_diet(
    sessions: &SessionStore,
    form: ProfileForm,
    save_plan: Option<&Path>,
    pdf: Option<&Path>,
) -> Result<()> {
    // Check the session before asking any questions
    sessions.require()?;
    let form = complete_profile_form(form)?;
    let plan = handlers::diet(sessions, &form)?;

    display_diet_plan(&plan);

    if let Some(path) = save_plan {
        write_atomic(path, plan.week.to_json()?.as_bytes())?;
        println!("Plan saved to {}", path.display());
        println!(
            "Export it later with: export --plan {} --water-intake {:?}",
            path.display(),
            plan.targets.water_liters
        );
    }

    if let Some(path) = pdf {
        export_diet_plan(&plan, &PdfRenderer::new(), path)?;
        println!("PDF written to {}", path.display());
    }

    Ok(())
}

fn cmd_export(
    sessions: &SessionStore,
    plan: Option<&Path>,
    water_intake: Option<String>,
    out: &Path,
) -> Result<()> {
    // An unreadable plan file counts as missing data
    let diet_plan = plan.and_then(|path| match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read plan file");
            None
        }
    });

    let form = ExportForm {
        diet_plan,
        water_intake,
    };
    handlers::export(sessions, &form, &PdfRenderer::new(), out)?;
    println!("PDF written to {}", out.display());
    Ok(())
}

fn cmd_predict(
    config: &AppConfig,
    age: Option<String>,
    bmi: Option<String>,
    glucose: Option<String>,
    insulin: Option<String>,
) -> Result<()> {
    let model = ForestModel::load(config.model_path())?;
    let mut log = CsvPredictionLog::new(config.predictions_path());

    let features = collect_risk_features(age, bmi, glucose, insulin)?;
    let label = handlers::predict(&model, &mut log, &features)?;

    display_prediction(&features, &label);
    Ok(())
}

fn cmd_history(config: &AppConfig, csv: Option<PathBuf>) -> Result<()> {
    let log = CsvPredictionLog::new(config.predictions_path());
    let records = handlers::history(&log)?;

    match csv {
        Some(path) => {
            write_history_csv(&records, &path)?;
            println!("Wrote {} records to {}", records.len(), path.display());
        }
        None => display_history(&records),
    }
    Ok(())
}
