//! Gradient-boosted regression trees.
//!
//! ```text
//! prediction = base_score + learning_rate × Σ tree(x)
//! ```
//!
//! Every tree is a flat node list with the root at index 0. A split sends `x[feature] < threshold`
//! to the `left` child and everything else to the `right` one.

use serde::{Deserialize, Serialize};

use crate::predictor::Regressor;
use crate::prelude::*;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    /// Input width the model was trained on.
    pub n_features: usize,

    #[serde(default)]
    pub base_score: f64,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    pub trees: Vec<Tree>,
}

const fn default_learning_rate() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

impl Tree {
    fn evaluate(&self, features: &[f64]) -> Result<f64> {
        let mut index = 0;
        // A well-formed tree never visits more nodes than it has.
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| anyhow!("node #{} is out of bounds of {}", index, self.nodes.len()))?;
            match *node {
                Node::Leaf { leaf } => return Ok(leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(feature).ok_or_else(|| {
                        anyhow!("feature #{} is out of bounds of {}", feature, features.len())
                    })?;
                    index = if *value < threshold { left } else { right };
                }
            }
        }
        Err(anyhow!("the tree contains a cycle or no leaves"))
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(anyhow!(
                "expected {} features, got {}",
                self.n_features,
                features.len(),
            ));
        }
        let mut sum = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            sum += tree
                .evaluate(features)
                .with_context(|| format!("failed to evaluate tree #{}", i))?;
        }
        let prediction = self.base_score + self.learning_rate * sum;
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(anyhow!("the model produced a non-finite value: {}", prediction))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two stumps on the bed slope and the well rate.
    fn stumps() -> TreeEnsemble {
        TreeEnsemble {
            n_features: 7,
            base_score: 0.5,
            learning_rate: 0.5,
            trees: vec![
                Tree {
                    nodes: vec![
                        Node::Split {
                            feature: 2,
                            threshold: 0.02,
                            left: 1,
                            right: 2,
                        },
                        Node::Leaf { leaf: 0.2 },
                        Node::Leaf { leaf: -0.2 },
                    ],
                },
                Tree {
                    nodes: vec![
                        Node::Split {
                            feature: 6,
                            threshold: 0.1,
                            left: 1,
                            right: 2,
                        },
                        Node::Leaf { leaf: 0.4 },
                        Node::Leaf { leaf: 0.0 },
                    ],
                },
            ],
        }
    }

    #[test]
    fn predict_ok() -> Result {
        let model = stumps();
        let prediction = model.predict(&[1.025, 0.015, 0.01, 0.5, 2.0, 1.0, 0.2])?;
        assert!((prediction - 0.6).abs() < 1e-12, "prediction: {}", prediction);
        let prediction = model.predict(&[1.025, 0.015, 0.05, 0.5, 2.0, 1.0, 0.05])?;
        assert!((prediction - 0.6).abs() < 1e-12, "prediction: {}", prediction);
        let prediction = model.predict(&[1.025, 0.015, 0.05, 0.5, 2.0, 1.0, 0.2])?;
        assert!((prediction - 0.4).abs() < 1e-12, "prediction: {}", prediction);
        Ok(())
    }

    #[test]
    fn threshold_goes_right_ok() -> Result {
        let prediction = stumps().predict(&[0.0, 0.0, 0.02, 0.0, 0.0, 0.0, 0.1])?;
        assert!((prediction - 0.4).abs() < 1e-12, "prediction: {}", prediction);
        Ok(())
    }

    #[test]
    fn empty_ensemble_predicts_base_score_ok() -> Result {
        let model = TreeEnsemble {
            n_features: 7,
            base_score: 1.5,
            learning_rate: 1.0,
            trees: Vec::new(),
        };
        assert_eq!(model.predict(&[1.0; 7])?, 1.5);
        Ok(())
    }

    #[test]
    fn shape_mismatch_fails() {
        let error = stumps().predict(&[1.0; 6]).unwrap_err();
        assert_eq!(error.to_string(), "expected 7 features, got 6");
    }

    #[test]
    fn feature_out_of_bounds_fails() {
        let mut model = stumps();
        model.trees[1].nodes[0] = Node::Split {
            feature: 9,
            threshold: 0.0,
            left: 1,
            right: 2,
        };
        let error = model.predict(&[1.0; 7]).unwrap_err();
        assert!(format!("{:#}", error).contains("feature #9 is out of bounds"));
    }

    #[test]
    fn cycle_fails() {
        let model = TreeEnsemble {
            n_features: 7,
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 1,
                        right: 1,
                    },
                    Node::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 0,
                        right: 0,
                    },
                ],
            }],
        };
        assert!(model.predict(&[0.5; 7]).is_err());
    }

    #[test]
    fn non_finite_prediction_fails() {
        let mut model = stumps();
        model.base_score = f64::INFINITY;
        assert!(model.predict(&[1.0; 7]).is_err());
    }

    #[test]
    fn parse_json_ok() -> Result {
        let model: TreeEnsemble = serde_json::from_str(
            // language=JSON
            r#"{
                "n_features": 7,
                "base_score": 0.5,
                "trees": [
                    {"nodes": [{"feature": 0, "threshold": 1.0, "left": 1, "right": 2}, {"leaf": 0.1}, {"leaf": 0.3}]}
                ]
            }"#,
        )?;
        assert_eq!(model.learning_rate, 1.0);
        assert_eq!(model.trees[0].nodes[2], Node::Leaf { leaf: 0.3 });
        assert!((model.predict(&[1.025, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])? - 0.8).abs() < 1e-12);
        Ok(())
    }
}
