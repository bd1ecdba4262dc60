//! Orchestrates executor discovery, scoring, optional ML prediction and
//! batch optimization into the three operations property managers actually
//! call: assign one request, assign a batch, and list what's waiting.
//!
//! - [`model`] — `DispatchRequest`, `DispatchResult`, `PendingRequest`.
//! - [`config`] — `DispatchMode`, `DispatcherConfig`.
//! - [`predictor`] — the pluggable `Predictor` trait and its rule-based
//!   fallback.
//! - [`dispatcher`] — `Dispatcher`, which composes discovery, scoring, ML
//!   prediction and batch optimization behind the fallback chain.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod model;
pub mod predictor;

pub use config::{DispatchMode, DispatcherConfig, DispatcherConfigBuilder};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use events::DispatcherEvent;
pub use model::{DispatchRequest, DispatchResult, PendingAssignment, PendingRequest, Suggestion};
pub use predictor::{rule_based_prediction, Prediction, PredictionFeatures, Predictor, RuleBasedPredictor};
