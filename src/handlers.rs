use std::path::Path;

use tracing::info;

use crate::auth::{CredentialStore, Session, SessionStore};
use crate::error::Result;
use crate::export::{ExportForm, PlanRenderer, export_plan};
use crate::models::{DietPlan, ProfileForm};
use crate::planner::generate_plan;
use crate::prediction::{PredictionLog, PredictionRecord, Predictor, RiskFeatures, RiskLabel, RiskModel};

pub fn register<S: CredentialStore>(store: &mut S, username: &str, password: &str) -> Result<()> {
    store.register(username, password)
}

/// Authenticate and remember the session.
pub fn login<S: CredentialStore>(
    store: &S,
    sessions: &SessionStore,
    username: &str,
    password: &str,
) -> Result<Session> {
    let session = store.authenticate(username, password)?;
    sessions.save(&session)?;
    Ok(session)
}

pub fn logout(sessions: &SessionStore) -> Result<Option<String>> {
    let previous = sessions.clear()?;
    if let Some(username) = &previous {
        info!(username = %username, "user logged out");
    }
    Ok(previous)
}

/// Parse the submitted profile and build the week's plan.
pub fn diet(sessions: &SessionStore, form: &ProfileForm) -> Result<DietPlan> {
    let session = sessions.require()?;
    let profile = form.parse()?;
    let plan = generate_plan(&profile)?;
    info!(
        username = %session.username,
        preference = %profile.preference,
        meals_per_day = profile.meals_per_day,
        "diet plan generated"
    );
    Ok(plan)
}

/// Requires a logged-in session, like `diet`.
pub fn export<R: PlanRenderer>(
    sessions: &SessionStore,
    form: &ExportForm,
    renderer: &R,
    dest: &Path,
) -> Result<()> {
    sessions.require()?;
    export_plan(form, renderer, dest)
}

pub fn predict<M: RiskModel, L: PredictionLog>(
    model: &M,
    log: &mut L,
    features: &RiskFeatures,
) -> Result<RiskLabel> {
    Predictor::new(model, log).predict(features)
}

pub fn history<L: PredictionLog>(log: &L) -> Result<Vec<PredictionRecord>> {
    log.history()
}
