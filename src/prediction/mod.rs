mod audit;
mod model;

pub use audit::{CsvPredictionLog, PredictionLog, PredictionRecord, write_history_csv};
pub use model::{
    DecisionTree, FEATURE_COUNT, ForestModel, RiskFeatures, RiskLabel, RiskModel, TreeNode,
};

use tracing::info;

use crate::error::Result;

/// Runs a model and audits every result.
pub struct Predictor<'a, M: RiskModel, L: PredictionLog> {
    model: &'a M,
    log: &'a mut L,
}

impl<'a, M: RiskModel, L: PredictionLog> Predictor<'a, M, L> {
    pub fn new(model: &'a M, log: &'a mut L) -> Self {
        Self { model, log }
    }

    pub fn predict(&mut self, features: &RiskFeatures) -> Result<RiskLabel> {
        let label = self.model.predict(features)?;
        self.log.record(features, &label)?;
        info!(result = %label, "risk prediction made");
        Ok(label)
    }
}
