//! Request data model, the request-number allocator and the request
//! state machine.
//!
//! - [`model`] — `Request`, `RequestComment`, `RequestAssignment` and the
//!   supporting value types.
//! - [`allocator`] — atomic `YYMMDD-NNN` issuance against a shared store.
//! - [`state_machine`] — the legal transition table and its optimistic
//!   concurrency guard.

pub mod allocator;
pub mod error;
pub mod events;
pub mod model;
pub mod state_machine;

pub use allocator::{AllocatorStore, InMemoryAllocatorStore, RedisAllocatorStore, RequestNumberAllocator};
pub use error::{AllocatorError, TransitionError};
pub use events::RequestEvent;
pub use model::{
    ActorRole, Coordinates, MaterialLine, Priority, Request, RequestAssignment, RequestComment,
    RequestStatus,
};
pub use state_machine::RequestStateMachine;
