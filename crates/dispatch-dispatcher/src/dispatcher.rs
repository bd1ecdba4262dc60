//! Orchestrates executor discovery, scoring, optional ML prediction and
//! batch optimization behind the fallback chain.

use crate::config::{DispatchMode, DispatcherConfig};
use crate::error::DispatchError;
use crate::events::DispatcherEvent;
use crate::model::{DispatchRequest, DispatchResult, PendingAssignment, PendingRequest, Suggestion};
use crate::predictor::{rule_based_prediction, Prediction, PredictionFeatures, Predictor};
use chrono::Utc;
use dispatch_core::events::{EventListener, EventListeners};
use dispatch_core::mode::ServiceMode;
use dispatch_directory::{rank, ExecutorDiscovery, ExecutorSnapshot, QueryCriteria};
use dispatch_fallback::{FallbackManager, OperationConfig};
use dispatch_optimizer::{
    Assignment, BatchOptimizer, CancellationToken, OptimizationResult, OptimizerRequest,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const ML_OPERATION: &str = "ml_prediction";

/// A scored candidate ready to become either an assignment or a suggestion.
struct Ranked {
    executor: ExecutorSnapshot,
    score: f64,
    degraded: bool,
}

pub struct Dispatcher {
    discovery: ExecutorDiscovery,
    optimizer: BatchOptimizer,
    ml_predictor: Option<Arc<dyn Predictor>>,
    ml_fallback: FallbackManager<Prediction>,
    config: DispatcherConfig,
    event_listeners: EventListeners<DispatcherEvent>,
}

impl Dispatcher {
    pub fn new(
        discovery: ExecutorDiscovery,
        optimizer: BatchOptimizer,
        ml_predictor: Option<Arc<dyn Predictor>>,
        config: DispatcherConfig,
        mode: ServiceMode,
    ) -> Self {
        let mut ml_fallback = FallbackManager::new(mode);
        ml_fallback.register_operation(
            ML_OPERATION,
            OperationConfig::new(
                Duration::from_millis(500),
                Duration::from_secs(30),
                Prediction {
                    success_probability: 0.5,
                    confidence: 0.3,
                },
            ),
        );

        Self {
            discovery,
            optimizer,
            ml_predictor,
            ml_fallback,
            config,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: EventListener<DispatcherEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    /// Executor Discovery -> scoring -> (optional) ML prediction for the
    /// top-K -> pick best. Every outbound step runs behind the fallback
    /// chain. Validation failures are raised directly; everything else
    /// degrades to a `DispatchResult` with `assigned: false`.
    pub async fn dispatch_one(&self, request: &DispatchRequest, mode: ServiceMode) -> Result<DispatchResult, DispatchError> {
        if request.request_id.is_empty() {
            return Err(DispatchError::EmptyRequestId);
        }

        let criteria = QueryCriteria {
            specialization: request.required_specialization.clone(),
            district: request.district.clone(),
            approved_only: true,
        };

        let discovered = self.discovery.discover(&criteria).await;

        if discovered.candidates.is_empty() {
            self.event_listeners.emit(&DispatcherEvent::Suggested {
                request_id: request.request_id.clone(),
                reason: "no_candidates".to_string(),
                candidate_count: 0,
                timestamp: Instant::now(),
            });

            return Ok(DispatchResult {
                request_id: request.request_id.clone(),
                assigned: false,
                executor_id: None,
                score: None,
                suggestions: Vec::new(),
                reason: Some("no_candidates".to_string()),
                degraded: discovered.degraded,
            });
        }

        let ranked = rank(request.required_specialization.as_deref(), discovered.candidates);
        let top_k: Vec<(ExecutorSnapshot, f64)> = ranked.into_iter().take(self.config.top_k.max(1)).collect();

        let use_ml = mode.allows_ml_prediction() && self.config.mode != DispatchMode::Manual;

        let mut candidates = Vec::with_capacity(top_k.len());
        for (executor, rule_score) in top_k {
            let (score, degraded) = if use_ml {
                self.blended_score(request, &executor, rule_score, mode).await
            } else {
                (rule_score, false)
            };
            candidates.push(Ranked { executor, score, degraded });
        }

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

        let degraded = discovered.degraded || candidates.iter().any(|c| c.degraded);
        let suggestions: Vec<Suggestion> = candidates
            .iter()
            .map(|c| Suggestion {
                executor_id: c.executor.executor_id.clone(),
                score: c.score,
            })
            .collect();

        let best = &candidates[0];

        let (assigned, executor_id, score, reason) = match self.config.mode {
            DispatchMode::Manual => (false, None, None, Some("manual_confirmation_required".to_string())),
            DispatchMode::AiAssisted => (false, None, None, Some("ai_assisted_suggestion".to_string())),
            DispatchMode::BatchOptimize => (false, None, None, Some("batch_mode_single_request_suggestion".to_string())),
            DispatchMode::AutoAssign => {
                if best.score >= self.config.auto_assign_threshold {
                    (true, Some(best.executor.executor_id.clone()), Some(best.score), None)
                } else {
                    (false, None, None, Some("below_confidence".to_string()))
                }
            }
        };

        if assigned {
            self.event_listeners.emit(&DispatcherEvent::Assigned {
                request_id: request.request_id.clone(),
                executor_id: executor_id.clone().unwrap(),
                score: score.unwrap(),
                degraded,
                timestamp: Instant::now(),
            });
        } else {
            self.event_listeners.emit(&DispatcherEvent::Suggested {
                request_id: request.request_id.clone(),
                reason: reason.clone().unwrap_or_default(),
                candidate_count: suggestions.len(),
                timestamp: Instant::now(),
            });
        }

        Ok(DispatchResult {
            request_id: request.request_id.clone(),
            assigned,
            executor_id,
            score,
            suggestions,
            reason,
            degraded,
        })
    }

    /// Blends the directory fit score with an ML prediction, wrapping the
    /// outbound ML call in the fallback chain so an unreachable predictor
    /// degrades to the rule-based formula instead of stalling dispatch.
    async fn blended_score(
        &self,
        request: &DispatchRequest,
        executor: &ExecutorSnapshot,
        rule_score: f64,
        _mode: ServiceMode,
    ) -> (f64, bool) {
        let Some(predictor) = self.ml_predictor.clone() else {
            return (rule_score, false);
        };

        let features = PredictionFeatures {
            specialization_match: request
                .required_specialization
                .as_ref()
                .map(|tag| executor.specializations.contains(tag))
                .unwrap_or(true),
            efficiency_score: executor.efficiency_score,
            district_match: request
                .district
                .as_ref()
                .map(|d| d == &executor.home_district)
                .unwrap_or(true),
        };

        let cache_key = format!("ml:{}:{}", request.request_id, executor.executor_id);

        let outcome = self
            .ml_fallback
            .execute(
                ML_OPERATION,
                &cache_key,
                || async move { predictor.predict(features).await },
                None::<fn() -> Option<Prediction>>,
                None::<fn() -> std::future::Ready<Result<Prediction, String>>>,
                Some(move || rule_based_prediction(features)),
            )
            .await;

        let degraded = outcome.strategy_used != dispatch_fallback::FallbackStep::Primary;
        let blended = rule_score * (1.0 - self.config.ml_weight) + outcome.data.success_probability * self.config.ml_weight;

        (blended, degraded)
    }

    /// Delegates to the batch optimizer with the configured algorithm.
    pub fn dispatch_batch(
        &self,
        requests: &[OptimizerRequest],
        executors: &[ExecutorSnapshot],
        mode: ServiceMode,
        cancellation: &CancellationToken,
    ) -> OptimizationResult {
        let result = self.optimizer.optimize(requests, executors, mode, cancellation);

        self.event_listeners.emit(&DispatcherEvent::BatchDispatched {
            algorithm: result.algorithm_used,
            assigned_count: result.assignments.len(),
            timestamp: Instant::now(),
        });

        result
    }

    /// Enumerates pending requests with staleness flags: `overdue` once a
    /// request has waited past `overdue_after_minutes`, and
    /// `auto_assign_eligible` when a best score is known and clears the
    /// admission threshold.
    pub fn get_pending_assignments(&self, pending: &[PendingRequest]) -> Vec<PendingAssignment> {
        let now = Utc::now();

        pending
            .iter()
            .map(|p| {
                let waiting_minutes = (now - p.created_at).num_minutes().max(0);
                PendingAssignment {
                    request_id: p.request_id.clone(),
                    waiting_minutes,
                    overdue: waiting_minutes >= self.config.overdue_after_minutes,
                    auto_assign_eligible: p
                        .best_score
                        .map(|s| s >= self.config.auto_assign_threshold)
                        .unwrap_or(false),
                }
            })
            .collect()
    }
}

#[allow(dead_code)]
fn assignment_score(assignment: &Assignment) -> f64 {
    assignment.score
}
