//! Wire types for the online prediction endpoint
//!
//! The service accepts `{"instances": [...]}` and answers
//! `{"predictions": [...]}`, one prediction object per submitted instance.
//! Each prediction object carries the estimator's output tensor, a
//! one-element array holding the predicted weight in pounds.

use serde::{Deserialize, Serialize};

use crate::models::Baby;

/// Request envelope for one or more feature records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub instances: Vec<Instance>,
}

impl PredictionRequest {
    /// Request for a single record
    pub fn single(record: &Baby) -> Self {
        Self {
            instances: vec![Instance::from(record)],
        }
    }

    /// Request for a collection of records, order preserved
    pub fn batch(records: &[Baby]) -> Self {
        Self {
            instances: records.iter().map(Instance::from).collect(),
        }
    }
}

/// One scoring instance. The target column is never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_male: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_race: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plurality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestation_weeks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_married: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cigarette_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_use: Option<String>,
    pub key: String,
}

impl From<&Baby> for Instance {
    fn from(baby: &Baby) -> Self {
        Self {
            is_male: baby.is_male.clone(),
            mother_age: baby.mother_age,
            mother_race: baby.mother_race.clone(),
            plurality: baby.plurality,
            gestation_weeks: baby.gestation_weeks,
            mother_married: baby.mother_married.clone(),
            cigarette_use: baby.cigarette_use.clone(),
            alcohol_use: baby.alcohol_use.clone(),
            key: baby.key.clone(),
        }
    }
}

/// Response envelope, order-aligned with the request instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One prediction object from the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Estimator output tensor; one element for this model
    #[serde(default)]
    pub predictions: Vec<f64>,
    /// Pass-through key, echoed by the serving signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl PredictionResponse {
    /// First element of each prediction's output tensor.
    ///
    /// Predictions with an empty tensor are skipped; the caller detects the
    /// resulting shortfall against its instance count.
    pub fn predicted_weights(&self) -> Vec<f64> {
        self.predictions
            .iter()
            .filter_map(|p| p.predictions.first().copied())
            .collect()
    }
}
