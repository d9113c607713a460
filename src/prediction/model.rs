use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HealthError, Result};

/// Number of model inputs: age, bmi, glucose, insulin.
pub const FEATURE_COUNT: usize = 4;

/// Risk inputs, in model feature order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFeatures {
    pub age: f64,
    pub bmi: f64,
    pub glucose: f64,
    pub insulin: f64,
}

impl RiskFeatures {
    /// Build a feature set, rejecting negative or non-finite values.
    pub fn new(age: f64, bmi: f64, glucose: f64, insulin: f64) -> Result<Self> {
        let features = Self {
            age,
            bmi,
            glucose,
            insulin,
        };
        if features
            .as_array()
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(HealthError::InvalidInput(
                "All values must be non-negative".to_string(),
            ));
        }
        Ok(features)
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.age, self.bmi, self.glucose, self.insulin]
    }
}

/// Class label produced by a risk model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLabel(pub String);

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pre-trained classifier, used as a black box.
pub trait RiskModel {
    fn predict(&self, features: &RiskFeatures) -> Result<RiskLabel>;
}

/// Decision tree node. Splits go left when `value <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

/// Nodes stored flat; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn classify(&self, values: &[f64; FEATURE_COUNT]) -> usize {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if values[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Children must point forward, which rules out cycles.
    fn validate(&self, tree: usize, labels: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(HealthError::InvalidModel(format!("tree {} has no nodes", tree)));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { class } if *class >= labels => {
                    return Err(HealthError::InvalidModel(format!(
                        "tree {} node {}: class {} has no label",
                        tree, i, class
                    )));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(HealthError::InvalidModel(format!(
                            "tree {} node {}: feature {} out of range",
                            tree, i, feature
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(HealthError::InvalidModel(format!(
                            "tree {} node {}: threshold is not finite",
                            tree, i
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(HealthError::InvalidModel(format!(
                                "tree {} node {}: bad child index {}",
                                tree, i, child
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Model file layout, checked before it becomes a `ForestModel`.
#[derive(Deserialize)]
struct ForestFile {
    labels: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl TryFrom<ForestFile> for ForestModel {
    type Error = HealthError;

    fn try_from(file: ForestFile) -> Result<Self> {
        Self::new(file.labels, file.trees)
    }
}

/// Majority-vote ensemble of decision trees. Only constructed validated, so
/// every leaf has a label and every path reaches a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestFile")]
pub struct ForestModel {
    labels: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn new(labels: Vec<String>, trees: Vec<DecisionTree>) -> Result<Self> {
        let model = Self { labels, trees };
        model.validate()?;
        Ok(model)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Load and validate a model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HealthError::InvalidModel(format!("cannot read {}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&content)?;
        info!(
            trees = model.trees.len(),
            labels = model.labels.len(),
            path = %path.display(),
            "loaded risk model"
        );
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HealthError::InvalidModel(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(HealthError::InvalidModel("no class labels".to_string()));
        }
        if self.trees.is_empty() {
            return Err(HealthError::InvalidModel("no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.labels.len())?;
        }
        Ok(())
    }

    /// Vote counts per class.
    pub fn votes(&self, features: &RiskFeatures) -> Vec<usize> {
        let values = features.as_array();
        let mut votes = vec![0; self.labels.len()];
        for tree in &self.trees {
            votes[tree.classify(&values)] += 1;
        }
        votes
    }
}

impl RiskModel for ForestModel {
    fn predict(&self, features: &RiskFeatures) -> Result<RiskLabel> {
        let votes = self.votes(features);

        // Ties go to the lowest class index
        let mut winner = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[winner] {
                winner = class;
            }
        }

        self.labels
            .get(winner)
            .map(|label| RiskLabel(label.clone()))
            .ok_or_else(|| HealthError::InvalidModel("no class labels".to_string()))
    }
}
