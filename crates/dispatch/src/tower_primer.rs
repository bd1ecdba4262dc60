//! # Tower Primer
//!
//! A brief introduction to Tower for developers new to the framework. The
//! rate limiter, circuit breaker, cache and single-strategy fallback
//! components are all Tower middleware; the rest of the substrate
//! (discovery, optimization, dispatching, webhook ingestion) is plain async
//! Rust that calls into them.
//!
//! ## What is Tower?
//!
//! [Tower](https://docs.rs/tower) is a library of modular and composable
//! components for building robust networking clients and servers:
//!
//! - **Service trait** - A unified interface for async request/response operations
//! - **Middleware layers** - Composable transformations applied to services
//!
//! ## Core Concepts
//!
//! ### The Service Trait
//!
//! ```rust,ignore
//! pub trait Service<Request> {
//!     type Response;
//!     type Error;
//!     type Future: Future<Output = Result<Self::Response, Self::Error>>;
//!
//!     fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>>;
//!     fn call(&mut self, req: Request) -> Self::Future;
//! }
//! ```
//!
//! ### Layers
//!
//! A [`Layer`](tower::Layer) wraps a service to add behavior without
//! modifying the core service logic:
//!
//! ```rust,ignore
//! pub trait Layer<S> {
//!     type Service;
//!     fn layer(&self, inner: S) -> Self::Service;
//! }
//! ```
//!
//! ### ServiceBuilder
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(rate_limiter_layer)
//!     .layer(circuit_breaker_layer)
//!     .service(directory_client);
//! ```
//!
//! ## Service Cloning
//!
//! Tower services must implement `Clone` to handle concurrent requests;
//! clones typically share state via `Arc`, not own independent copies of it:
//!
//! ```rust,no_run
//! # use tower::Service;
//! # async fn example() {
//! # let mut service = tower::service_fn(|_req: ()| async { Ok::<_, std::io::Error>(()) });
//! let mut svc1 = service.clone();
//! let mut svc2 = service.clone();
//!
//! tokio::spawn(async move {
//!     let _ = svc1.call(()).await;
//! });
//! tokio::spawn(async move {
//!     let _ = svc2.call(()).await;
//! });
//! # }
//! ```
//!
//! ## Common Pitfalls
//!
//! ### Forgetting poll_ready
//!
//! ```rust,no_run
//! # use tower::{Service, ServiceExt};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let mut service = tower::service_fn(|_req: ()| async { Ok::<_, std::io::Error>(()) });
//! # let request = ();
//! // ✅ Correct
//! service.ready().await?;
//! let response = service.call(request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Layer Ordering
//!
//! Layers execute **outside-in**. The outermost layer sees the request
//! first and the response last; see [`crate::composition::patterns`] for
//! where rate limiting, circuit breaking and fallback sit relative to each
//! other.
//!
//! ### Error Type Compatibility
//!
//! When composing layers, error types must be compatible. Use
//! [`dispatch_core::error::ResilienceError`] to unify errors from several
//! layers under one type instead of hand-writing a `From` impl per pair.
