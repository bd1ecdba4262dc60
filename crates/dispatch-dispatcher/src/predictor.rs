//! The pluggable ML predictor interface and its rule-based fallback.

use async_trait::async_trait;

/// Features handed to a [`Predictor`] for one candidate executor.
#[derive(Debug, Clone, Copy)]
pub struct PredictionFeatures {
    pub specialization_match: bool,
    /// 0..100
    pub efficiency_score: f64,
    pub district_match: bool,
}

/// A predictor's verdict on one candidate.
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    pub success_probability: f64,
    pub confidence: f64,
}

/// `Predict(features) -> {success_probability, confidence}`. The
/// dispatcher must work with any implementation, including
/// [`RuleBasedPredictor`], and never require an external ML service to be
/// reachable.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: PredictionFeatures) -> Result<Prediction, String>;
}

/// Base 0.5, +0.2 for a specialization match, +0.2 scaled by efficiency,
/// +0.1 for a district match, clamped to `[0.1, 0.95]`. Used both as the
/// default predictor and as the fallback chain's terminal strategy when an
/// ML service is configured but unreachable.
pub fn rule_based_prediction(features: PredictionFeatures) -> Prediction {
    let mut score = 0.5;

    if features.specialization_match {
        score += 0.2;
    }

    score += (features.efficiency_score / 100.0) * 0.2;

    if features.district_match {
        score += 0.1;
    }

    Prediction {
        success_probability: score.clamp(0.1, 0.95),
        confidence: 0.7,
    }
}

/// The rule-based scorer used when no ML service is configured.
pub struct RuleBasedPredictor;

#[async_trait]
impl Predictor for RuleBasedPredictor {
    async fn predict(&self, features: PredictionFeatures) -> Result<Prediction, String> {
        Ok(rule_based_prediction(features))
    }
}
