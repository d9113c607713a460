mod pdf;

pub use pdf::{DOCUMENT_TITLE, PdfRenderer, PlanRenderer};

use std::path::Path;

use tracing::{error, info, warn};

use crate::error::{HealthError, Result};
use crate::models::{DietPlan, WeeklyPlan};
use crate::state::write_atomic;

/// Export request: a serialized weekly plan plus the water target, both as
/// submitted text.
#[derive(Debug, Clone, Default)]
pub struct ExportForm {
    pub diet_plan: Option<String>,
    pub water_intake: Option<String>,
}

impl ExportForm {
    pub fn from_plan(plan: &DietPlan) -> Result<Self> {
        Ok(Self {
            diet_plan: Some(plan.week.to_json()?),
            water_intake: Some(format!("{:?}", plan.targets.water_liters)),
        })
    }

    /// Decode the payload. Every failure here is the caller's to fix.
    ///
    /// The water intake must be a finite, non-negative number but is handed
    /// back as the trimmed submitted text, which is what the document prints.
    pub fn parse(&self) -> Result<(WeeklyPlan, String)> {
        let (Some(plan_json), Some(water)) = (present(&self.diet_plan), present(&self.water_intake))
        else {
            return Err(HealthError::MalformedPlan(
                "Missing diet plan or water intake data.".to_string(),
            ));
        };

        let plan = WeeklyPlan::from_json(plan_json)?;
        let water = water.trim();
        water
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .ok_or_else(|| HealthError::MalformedPlan(format!("Invalid water intake '{}'", water)))?;

        Ok((plan, water.to_string()))
    }
}

/// Render the submitted plan and write it to `dest`.
///
/// The document is fully rendered in memory and then written through a
/// temporary file, so `dest` either holds a complete document or is left
/// untouched.
pub fn export_plan<R: PlanRenderer>(form: &ExportForm, renderer: &R, dest: &Path) -> Result<()> {
    let result = form
        .parse()
        .and_then(|(plan, water)| write_document(renderer, &plan, &water, dest));

    match &result {
        Ok(()) => info!(dest = %dest.display(), "diet plan exported"),
        Err(e) if e.is_client_error() => warn!(error = %e, "rejected export request"),
        Err(e) => error!(error = %e, dest = %dest.display(), "export failed"),
    }
    result
}

/// Export a freshly generated plan directly.
pub fn export_diet_plan<R: PlanRenderer>(plan: &DietPlan, renderer: &R, dest: &Path) -> Result<()> {
    export_plan(&ExportForm::from_plan(plan)?, renderer, dest)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn write_document<R: PlanRenderer>(
    renderer: &R,
    plan: &WeeklyPlan,
    water: &str,
    dest: &Path,
) -> Result<()> {
    let bytes = renderer.render(plan, water)?;
    write_atomic(dest, &bytes)
}
