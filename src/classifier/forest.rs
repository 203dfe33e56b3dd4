//! Random forest artifact
//!
//! The forest is trained elsewhere and shipped as JSON:
//!
//! ```json
//! {
//!   "name": "random_forest",
//!   "feature_names": ["Hour", "V1", "…", "Amount", "Amount_log"],
//!   "trees": [
//!     { "root": { "feature_idx": 30, "threshold": 5.2,
//!                 "left":  { "value": 0.0 },
//!                 "right": { "value": 1.0 } } }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use super::Classifier;

/// Tree node. A node with both children is a split, anything else a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index for split
    #[serde(default)]
    pub feature_idx: Option<usize>,
    /// Threshold for split; `x <= threshold` goes left
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Class label at a leaf
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub left: Option<Box<TreeNode>>,
    #[serde(default)]
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    #[cfg(test)]
    pub fn leaf(value: f64) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            value,
            left: None,
            right: None,
        }
    }

    #[cfg(test)]
    pub fn split(feature_idx: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        Self {
            feature_idx: Some(feature_idx),
            threshold: Some(threshold),
            value: 0.0,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Make sure every split is complete and refers to a known feature.
    fn check(&self, n_features: usize, path: &str) -> Result<()> {
        if self.is_leaf() {
            ensure!(self.value.is_finite(), "{path}: leaf value is not finite");
            return Ok(());
        }
        let (Some(feature), Some(threshold), Some(left), Some(right)) =
            (self.feature_idx, self.threshold, &self.left, &self.right)
        else {
            bail!("{path}: split node is missing a feature, threshold or child");
        };
        ensure!(
            feature < n_features,
            "{path}: feature index {feature} out of range (model has {n_features} features)"
        );
        ensure!(!threshold.is_nan(), "{path}: threshold is NaN");
        left.check(n_features, &format!("{path}.left"))?;
        right.check(n_features, &format!("{path}.right"))
    }
}

/// A single decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    #[cfg(test)]
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// Walk to a leaf and return its value. Missing features (NaN) fail every
    /// `<=` comparison and go right.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match (node.feature_idx, node.threshold, &node.left, &node.right) {
                (Some(idx), Some(threshold), Some(left), Some(right)) => {
                    let goes_left = features.get(idx).is_some_and(|&x| x <= threshold);
                    node = if goes_left { &**left } else { &**right };
                }
                _ => return node.value,
            }
        }
    }
}

/// Random Forest model: majority vote over binary classification trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default = "default_name")]
    name: String,
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

fn default_name() -> String {
    "random_forest".to_string()
}

impl RandomForest {
    /// Build a forest in memory; the structure is checked the same way as
    /// a loaded artifact.
    #[cfg(test)]
    pub fn new(feature_names: Vec<String>, trees: Vec<DecisionTree>) -> Result<Self> {
        let forest = Self {
            name: default_name(),
            feature_names,
            trees,
        };
        forest.check()?;
        Ok(forest)
    }

    /// Load a serialized forest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading model {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading model {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let forest: RandomForest = serde_json::from_str(text).context("parsing model JSON")?;
        forest.check()?;
        Ok(forest)
    }

    fn check(&self) -> Result<()> {
        ensure!(!self.trees.is_empty(), "model has no trees");
        ensure!(!self.feature_names.is_empty(), "model declares no features");
        let n_features = self.feature_names.len();
        for (i, tree) in self.trees.iter().enumerate() {
            tree.root.check(n_features, &format!("tree {i}"))?;
        }
        Ok(())
    }

    /// Predict the class label for a single sample.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let pos_votes = self.positive_votes(features);
        if pos_votes > self.trees.len() / 2 {
            1.0
        } else {
            0.0
        }
    }

    fn positive_votes(&self, features: &[f64]) -> usize {
        self.trees
            .iter()
            .filter(|t| t.predict_one(features) > 0.5)
            .count()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|r| self.predict_one(r)).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    /// Fraud when feature 1 is above `cut`.
    fn stump(cut: f64) -> DecisionTree {
        DecisionTree::new(TreeNode::split(1, cut, TreeNode::leaf(0.0), TreeNode::leaf(1.0)))
    }

    #[test]
    fn tree_goes_left_on_less_or_equal() {
        let tree = stump(5.0);
        assert_eq!(tree.predict_one(&[0.0, 5.0]), 0.0);
        assert_eq!(tree.predict_one(&[0.0, 5.1]), 1.0);
    }

    #[test]
    fn nan_goes_right() {
        assert_eq!(stump(5.0).predict_one(&[0.0, f64::NAN]), 1.0);
    }

    #[test]
    fn majority_vote_with_ties_to_negative() {
        let forest = RandomForest::new(names(2), vec![stump(1.0), stump(2.0), stump(3.0)]).unwrap();
        assert_eq!(forest.predict_one(&[0.0, 0.5]), 0.0);
        assert_eq!(forest.predict_one(&[0.0, 2.5]), 1.0);
        assert_eq!(forest.positive_votes(&[0.0, 1.5]), 1);

        let even = RandomForest::new(names(2), vec![stump(1.0), stump(2.0)]).unwrap();
        assert_eq!(even.predict_one(&[0.0, 1.5]), 0.0);
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "feature_names": ["a", "b"],
            "trees": [
                { "root": { "feature_idx": 0, "threshold": 0.5,
                            "left": { "value": 0.0 },
                            "right": { "value": 1.0 } } }
            ]
        }"#;
        let forest = RandomForest::from_json(json).unwrap();
        assert_eq!(forest.n_trees(), 1);
        assert_eq!(forest.name(), "random_forest");
        assert_eq!(forest.predict(&[vec![0.0, 0.0], vec![1.0, 0.0]]), vec![0.0, 1.0]);
    }

    #[test]
    fn round_trips_through_serde() {
        let forest = RandomForest::new(names(2), vec![stump(1.0)]).unwrap();
        let json = serde_json::to_string(&forest).unwrap();
        let back = RandomForest::from_json(&json).unwrap();
        assert_eq!(back.feature_names(), forest.feature_names());
    }

    #[test]
    fn rejects_broken_artifacts() {
        let no_trees = r#"{ "feature_names": ["a"], "trees": [] }"#;
        assert!(RandomForest::from_json(no_trees).is_err());

        let bad_index = r#"{ "feature_names": ["a"], "trees": [
            { "root": { "feature_idx": 3, "threshold": 0.5,
                        "left": { "value": 0.0 }, "right": { "value": 1.0 } } } ] }"#;
        let err = RandomForest::from_json(bad_index).unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));

        let half_split = r#"{ "feature_names": ["a"], "trees": [
            { "root": { "feature_idx": 0, "threshold": 0.5,
                        "left": { "value": 0.0 } } } ] }"#;
        assert!(RandomForest::from_json(half_split).is_err());

        assert!(RandomForest::from_json("not json").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = RandomForest::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading model"));
    }
}
