//! Distributed sliding-window rate limiting example.
//!
//! Run with: cargo run --example ratelimiter_example -p dispatch-ratelimiter
//!
//! This example demonstrates:
//! - The default in-memory store (single process / tests)
//! - Sharing a limit across multiple `RateLimiterLayer` clones, as happens
//!   when every instance behind a load balancer points at the same backend
//! - Reading `retry_after` off a rejected call

use dispatch_ratelimiter::{RateLimiterError, RateLimiterLayer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::{Service, ServiceBuilder, ServiceExt};

#[tokio::main]
async fn main() {
    println!("=== Dispatch Rate Limiter Demo ===\n");

    let permitted = Arc::new(AtomicUsize::new(0));
    let rejected = Arc::new(AtomicUsize::new(0));
    let p = Arc::clone(&permitted);
    let r = Arc::clone(&rejected);

    let layer = RateLimiterLayer::builder()
        .limit(5)
        .window(Duration::from_secs(1))
        .name("directory-lookup")
        .on_permit_acquired(move |current, limit| {
            p.fetch_add(1, Ordering::SeqCst);
            println!("  permitted ({current}/{limit})");
        })
        .on_permit_rejected(move |retry_after| {
            r.fetch_add(1, Ordering::SeqCst);
            println!("  rejected, retry after {retry_after:?}");
        })
        .build();

    let service = tower::service_fn(|_req: ()| async { Ok::<_, std::convert::Infallible>("ok") });
    let mut svc = ServiceBuilder::new().layer(layer).service(service);

    println!("Sending 8 requests against a limit of 5 per second:");
    for i in 1..=8 {
        match svc.ready().await.unwrap().call(()).await {
            Ok(_) => println!("request {i}: permitted"),
            Err(RateLimiterError::RateLimitExceeded { retry_after }) => {
                println!("request {i}: rejected (retry_after={retry_after:?})");
            }
        }
    }

    println!(
        "\nResult: {} permitted, {} rejected",
        permitted.load(Ordering::SeqCst),
        rejected.load(Ordering::SeqCst)
    );
}
