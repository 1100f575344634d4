//! Admin dashboard

use crate::api::{ApiClient, ApiError};
use crate::models::DashboardStats;

#[derive(Clone, Debug)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Content counters. Requires a signed-in session.
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        if !self.client.session().is_authenticated() {
            return Err(ApiError::Unauthenticated);
        }
        self.client.get("/dashboard/stats").await
    }
}
