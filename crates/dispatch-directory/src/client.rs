//! The pluggable directory backend.

use crate::model::{ExecutorSnapshot, QueryCriteria};
use async_trait::async_trait;

/// Queries the external user directory for executor candidates. Production
/// code implements this against the real directory service; tests and the
/// default configuration can use [`InMemoryDirectoryClient`].
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn query(&self, criteria: &QueryCriteria) -> Result<Vec<ExecutorSnapshot>, String>;
}

/// A fixed roster, filtered in-process. Useful for tests and for small
/// deployments that don't run a separate directory service.
pub struct InMemoryDirectoryClient {
    roster: Vec<ExecutorSnapshot>,
}

impl InMemoryDirectoryClient {
    pub fn new(roster: Vec<ExecutorSnapshot>) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectoryClient {
    async fn query(&self, criteria: &QueryCriteria) -> Result<Vec<ExecutorSnapshot>, String> {
        let matches = self
            .roster
            .iter()
            .filter(|e| {
                criteria
                    .specialization
                    .as_ref()
                    .map(|s| e.specializations.contains(s) || e.specializations.contains("general"))
                    .unwrap_or(true)
            })
            .filter(|e| {
                criteria
                    .district
                    .as_ref()
                    .map(|d| &e.home_district == d)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        Ok(matches)
    }
}
