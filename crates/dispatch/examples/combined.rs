//! Example demonstrating a circuit breaker with a fallback handler protecting
//! a flaky call to the executor directory.

use dispatch_circuitbreaker::CircuitBreakerLayer;
use futures::future::BoxFuture;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::time::sleep;
use tower::{Layer, Service};

#[derive(Debug)]
struct DirectoryError;

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "directory lookup failed")
    }
}

impl std::error::Error for DirectoryError {}

#[tokio::main]
async fn main() {
    let total_calls = Arc::new(AtomicUsize::new(0));
    let total_clone = Arc::clone(&total_calls);

    // A directory lookup that fails 70% of the time.
    let directory = tower::service_fn(move |_req: ()| {
        let total = Arc::clone(&total_clone);
        async move {
            let call_num = total.fetch_add(1, Ordering::SeqCst) + 1;
            sleep(Duration::from_millis(20)).await;

            if call_num % 10 < 7 {
                Err(DirectoryError)
            } else {
                Ok::<Vec<String>, DirectoryError>(vec!["exec-1".to_string(), "exec-2".to_string()])
            }
        }
    });

    let cb_layer = CircuitBreakerLayer::<Vec<String>, DirectoryError>::builder()
        .failure_rate_threshold(0.5)
        .sliding_window_size(10)
        .wait_duration_in_open(Duration::from_secs(2))
        .build();

    // Serve a last-known-good roster once the circuit trips, instead of an error.
    let mut service = cb_layer.layer(directory).with_fallback(|_req: ()| -> BoxFuture<'static, Result<Vec<String>, DirectoryError>> {
        Box::pin(async { Ok(vec!["exec-1".to_string()]) })
    });

    println!("Sending 30 requests to a directory with:");
    println!("  - 70% failure rate");
    println!("  - Circuit breaker with 50% failure threshold over 10 calls");
    println!("  - Fallback to a single cached executor once the circuit opens\n");

    for i in 1..=30 {
        match tower::ServiceExt::ready(&mut service).await.unwrap().call(()).await {
            Ok(roster) => println!("Request {i}: {} candidate(s)", roster.len()),
            Err(e) => println!("Request {i}: failed ({e})"),
        }

        sleep(Duration::from_millis(10)).await;
    }

    println!("\nTotal calls that reached the directory: {}", total_calls.load(Ordering::SeqCst));
}
