//! The request data model: `Request`, its append-only `RequestComment`
//! journal, and `RequestAssignment`.

use chrono::{DateTime, Utc};
use std::fmt;

/// States a request can be in. Stored and logged as the strings in
/// [`RequestStatus::as_str`], never as a bare discriminant, so journal
/// entries stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    New,
    Assigned,
    InProgress,
    MaterialsRequested,
    MaterialsDelivered,
    WaitingPayment,
    Completed,
    Cancelled,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::Assigned => "assigned",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::MaterialsRequested => "materials_requested",
            RequestStatus::MaterialsDelivered => "materials_delivered",
            RequestStatus::WaitingPayment => "waiting_payment",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Terminal states are never left once entered.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Cancelled | RequestStatus::Rejected
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1 (lowest) .. 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A maintenance/service request.
#[derive(Debug, Clone)]
pub struct Request {
    pub request_number: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: RequestStatus,
    pub address: String,
    pub building_id: Option<String>,
    pub apartment_id: Option<String>,
    pub applicant_id: String,
    pub executor_id: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub materials: Vec<MaterialLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub work_completed_at: Option<DateTime<Utc>>,
    pub deleted: bool,
    /// Optimistic concurrency token; bumped on every state transition.
    pub version: u64,
}

impl Request {
    pub fn new(
        request_number: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        address: impl Into<String>,
        applicant_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            request_number: request_number.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            priority,
            status: RequestStatus::New,
            address: address.into(),
            building_id: None,
            apartment_id: None,
            applicant_id: applicant_id.into(),
            executor_id: None,
            coordinates: None,
            materials: Vec::new(),
            created_at: now,
            updated_at: now,
            work_completed_at: None,
            deleted: false,
            version: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterialLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Append-only journal entry. Immutable once written, except for the
/// soft-delete mark.
#[derive(Debug, Clone)]
pub struct RequestComment {
    pub request_number: String,
    pub author_id: String,
    pub text: String,
    pub old_status: Option<RequestStatus>,
    pub new_status: Option<RequestStatus>,
    pub is_status_change: bool,
    pub media_refs: Vec<String>,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

/// Role performing an action, used by the state machine's permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Applicant,
    Executor,
    Admin,
    System,
}

/// Links a request to an executor. At most one active assignment per
/// request at any time (enforced by callers deactivating the prior one
/// before creating a new one).
#[derive(Debug, Clone)]
pub struct RequestAssignment {
    pub request_number: String,
    pub assignee_id: String,
    pub assigner_id: String,
    pub method: String,
    pub required_specialization: Option<String>,
    pub reason: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub active: bool,
}
