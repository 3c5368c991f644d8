use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Class indices are a fixed contract with the artifact.
pub const CLASS_PRESSURE: usize = 0;
pub const CLASS_STRIKE_ROTATION: usize = 1;
pub const CLASS_BOUNDARY: usize = 2;

pub const EXPECTED_CLASSES: [&str; 3] = ["Pressure", "Strike Rotation", "Boundary"];

const ARTIFACT_PATH_ENV: &str = "STRIKE_MODEL_ARTIFACT_PATH";
const ARTIFACT_ASSET_PATH: &str = "assets/strike_optimizer_v1.json";

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Label(String),
}

/// One model input row: feature name -> value. The set of names must match
/// the artifact's schema exactly.
pub type FeatureRow = HashMap<String, FeatureValue>;

/// The opaque classifier boundary. Implementations must be safe for
/// concurrent read access once constructed.
pub trait ProbabilityModel: Send + Sync {
    fn feature_names(&self) -> Vec<&str>;

    /// One 3-class probability vector per input row, summing to 1.0, in the
    /// fixed Pressure / Strike Rotation / Boundary order.
    fn predict_proba(&self, rows: &[FeatureRow]) -> Result<Vec<[f64; 3]>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    Numeric {
        name: String,
        mean: f64,
        std: f64,
    },
    Categorical {
        name: String,
        levels: Vec<String>,
    },
}

impl FeatureSpec {
    pub fn name(&self) -> &str {
        match self {
            FeatureSpec::Numeric { name, .. } => name,
            FeatureSpec::Categorical { name, .. } => name,
        }
    }

    fn width(&self) -> usize {
        match self {
            FeatureSpec::Numeric { .. } => 1,
            FeatureSpec::Categorical { levels, .. } => levels.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub generated_at: String,
    #[serde(default)]
    pub source: Option<String>,
    pub classes: Vec<String>,
    pub features: Vec<FeatureSpec>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Multinomial linear classifier loaded from a JSON artifact: standardized
/// numerics, one-hot categoricals, softmax over per-class scores.
#[derive(Debug, Clone)]
pub struct StrikeModel {
    artifact: ModelArtifact,
    design_width: usize,
}

impl StrikeModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let class_names: Vec<&str> = artifact.classes.iter().map(String::as_str).collect();
        if class_names != EXPECTED_CLASSES {
            return Err(anyhow!(
                "artifact classes {:?} do not match the expected order {:?}",
                artifact.classes,
                EXPECTED_CLASSES
            ));
        }

        let design_width: usize = artifact.features.iter().map(FeatureSpec::width).sum();
        if artifact.coefficients.len() != EXPECTED_CLASSES.len() {
            return Err(anyhow!(
                "artifact has {} coefficient rows, expected {}",
                artifact.coefficients.len(),
                EXPECTED_CLASSES.len()
            ));
        }
        for (idx, row) in artifact.coefficients.iter().enumerate() {
            if row.len() != design_width {
                return Err(anyhow!(
                    "coefficient row {idx} has width {}, expected {design_width}",
                    row.len()
                ));
            }
        }
        if artifact.intercepts.len() != EXPECTED_CLASSES.len() {
            return Err(anyhow!(
                "artifact has {} intercepts, expected {}",
                artifact.intercepts.len(),
                EXPECTED_CLASSES.len()
            ));
        }

        Ok(Self {
            artifact,
            design_width,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let artifact =
            serde_json::from_str::<ModelArtifact>(raw).context("parse model artifact json")?;
        Self::from_artifact(artifact)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    fn design_vector(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        // Exact schema match both ways: a row key the artifact does not know
        // is as much a configuration error as a missing feature.
        for name in row.keys() {
            if !self.artifact.features.iter().any(|f| f.name() == name) {
                return Err(anyhow!("feature '{name}' is not in the model schema"));
            }
        }

        let mut design = Vec::with_capacity(self.design_width);
        for spec in &self.artifact.features {
            let value = row
                .get(spec.name())
                .ok_or_else(|| anyhow!("missing feature '{}'", spec.name()))?;
            match (spec, value) {
                (FeatureSpec::Numeric { mean, std, .. }, FeatureValue::Number(v)) => {
                    design.push((v - mean) / std.max(1e-6));
                }
                (FeatureSpec::Categorical { name, levels }, FeatureValue::Label(label)) => {
                    let hit = levels.iter().position(|l| l == label).ok_or_else(|| {
                        anyhow!("feature '{name}' has no level '{label}' in the model schema")
                    })?;
                    for idx in 0..levels.len() {
                        design.push(if idx == hit { 1.0 } else { 0.0 });
                    }
                }
                (spec, _) => {
                    return Err(anyhow!(
                        "feature '{}' has the wrong value kind for the model schema",
                        spec.name()
                    ));
                }
            }
        }
        Ok(design)
    }
}

impl ProbabilityModel for StrikeModel {
    fn feature_names(&self) -> Vec<&str> {
        self.artifact.features.iter().map(FeatureSpec::name).collect()
    }

    fn predict_proba(&self, rows: &[FeatureRow]) -> Result<Vec<[f64; 3]>> {
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let design = self.design_vector(row)?;
            let mut scores = [0.0f64; 3];
            for (class, score) in scores.iter_mut().enumerate() {
                let coeffs = &self.artifact.coefficients[class];
                let dot: f64 = coeffs.iter().zip(&design).map(|(c, x)| c * x).sum();
                *score = self.artifact.intercepts[class] + dot;
            }
            out.push(softmax3(scores));
        }
        Ok(out)
    }
}

fn softmax3(scores: [f64; 3]) -> [f64; 3] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = scores.map(|s| (s - max).exp());
    let sum: f64 = exps.iter().sum();
    exps.map(|e| e / sum)
}

/// Load the classifier: env override path, then the on-disk asset, then the
/// copy embedded at build time.
pub fn load_strike_model() -> Result<StrikeModel> {
    if let Ok(raw_path) = env::var(ARTIFACT_PATH_ENV) {
        let path = PathBuf::from(raw_path.trim());
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read model artifact {}", path.display()))?;
        return StrikeModel::from_json(&raw)
            .with_context(|| format!("load model artifact {}", path.display()));
    }

    if let Ok(raw) = fs::read_to_string(ARTIFACT_ASSET_PATH) {
        return StrikeModel::from_json(&raw)
            .with_context(|| format!("load model artifact {ARTIFACT_ASSET_PATH}"));
    }

    StrikeModel::from_json(include_str!("../assets/strike_optimizer_v1.json"))
        .context("load embedded model artifact")
}

/// Process-wide instance, initialized once and shared read-only across
/// concurrent scoring requests.
pub fn global_model() -> Option<&'static StrikeModel> {
    static MODEL: OnceCell<Option<StrikeModel>> = OnceCell::new();
    MODEL.get_or_init(|| load_strike_model().ok()).as_ref()
}
