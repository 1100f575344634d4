//! Admin dashboard statistics

use serde::{Deserialize, Serialize};

/// Counters returned by `/dashboard/stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, alias = "totalNews", alias = "news")]
    pub total_news: u64,
    #[serde(default, alias = "activeTenders", alias = "tenders")]
    pub active_tenders: u64,
    #[serde(default)]
    pub partners: u64,
    #[serde(default)]
    pub programs: u64,
}
