//! Example demonstrating several dispatch components working independently:
//! - Rate limiting
//! - The multi-strategy fallback manager
//! - Geo distance and travel time
//! - Inbound webhook ingestion
//!
//! Note: each demo is self-contained. See `combined.rs` for two components
//! (circuit breaker + fallback) composed into a single call stack.

use dispatch_core::mode::ServiceMode;
use std::time::Duration;

#[tokio::main]
async fn main() {
    println!("Dispatch Resilience Substrate - Component Showcase");
    println!("===================================================\n");

    demo_rate_limiter().await;
    demo_fallback_manager().await;
    demo_geo().await;
    demo_webhook_ingestion().await;
}

async fn demo_rate_limiter() {
    use dispatch_ratelimiter::{InMemoryRateLimitStore, RateLimitStore};
    use std::sync::Arc;

    println!("--- Rate Limiter ---");
    let store: Arc<dyn RateLimitStore> = Arc::new(InMemoryRateLimitStore::default());

    for i in 1..=5 {
        let decision = store.check("directory-poll", 3, Duration::from_secs(60)).await;
        println!(
            "Request {i}: allowed={} current={}/{}",
            decision.allowed, decision.current_count, decision.limit
        );
    }
    println!();
}

async fn demo_fallback_manager() {
    use dispatch_fallback::{FallbackManager, OperationConfig};

    println!("--- Fallback Manager ---");
    let mut manager = FallbackManager::<String>::new(ServiceMode::Full);
    manager.register_operation(
        "fetch_roster",
        OperationConfig::new(Duration::from_millis(200), Duration::from_secs(30), "empty roster".to_string()),
    );

    let outcome = manager
        .execute(
            "fetch_roster",
            "roster:tashkent",
            || async { Err::<String, _>("directory unreachable".to_string()) },
            None::<fn() -> Option<String>>,
            None::<fn() -> std::future::Ready<Result<String, String>>>,
            Some(|| "last-known roster (2 executors)".to_string()),
        )
        .await;

    println!(
        "Strategy used: {} (degraded: {}) -> {}",
        outcome.strategy_used.as_str(),
        outcome.degraded,
        outcome.data
    );
    println!();
}

async fn demo_geo() {
    use dispatch_geo::{GeoConfig, GeoOptimizer};

    println!("--- Geo Optimizer ---");
    let optimizer = GeoOptimizer::new(GeoConfig::builder().build());
    let km = optimizer.district_distance("Chilanzar", "Yunusabad");
    let minutes = optimizer.travel_time_minutes("Chilanzar", "Yunusabad", dispatch_geo::TransportMode::Car, 9);
    println!("Chilanzar -> Yunusabad: {km:.1} km, ~{minutes} min by car at 9am");
    println!();
}

async fn demo_webhook_ingestion() {
    use dispatch_credentials::compute_hmac_hex;
    use dispatch_webhooks::{IngestRequest, NoopHandler, WebhookConfig, WebhookIngestor};
    use std::collections::HashMap;
    use std::sync::Arc;

    println!("--- Webhook Ingestor ---");
    let secret = b"stripe-shared-secret".to_vec();
    let config = WebhookConfig::builder("stripe", secret.clone()).build();
    let ingestor = WebhookIngestor::new(
        vec![config],
        Arc::new(NoopHandler),
        Arc::new(dispatch_webhooks::InMemoryIdempotencyStore::new()),
    );

    let body = r#"{"id":"evt_123","type":"payment.succeeded"}"#.to_string();
    let mut headers = HashMap::new();
    headers.insert("X-Signature".to_string(), compute_hmac_hex(&secret, body.as_bytes()));

    let outcome = ingestor
        .receive(IngestRequest {
            source: "stripe".to_string(),
            event_type: "payment.succeeded".to_string(),
            headers,
            body,
        })
        .await
        .unwrap();

    println!(
        "Delivery {}: status={} signature_valid={} duplicate={}",
        outcome.event_id,
        outcome.status.as_str(),
        outcome.signature_valid,
        outcome.duplicate
    );
}
