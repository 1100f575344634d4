//! Services layer
//!
//! Everything the portal does with the backend, built on [`crate::api::ApiClient`]:
//! - Admin resource management (news, tenders, partners, programs)
//! - Public content sections and program details
//! - Authentication, contact messages and dashboard statistics
//! - Resolution of stored document links

pub mod auth;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod documents;
pub mod news;
pub mod partners;
pub mod programs;
pub mod resource;
pub mod tenders;

pub use auth::{login_failure_message, registration_failure_message, AuthError, AuthService};
pub use contact::ContactService;
pub use content::{ContentService, HomeContent, PartnerGroups};
pub use dashboard::DashboardService;
pub use documents::DocumentLink;
pub use news::{NewsManager, NewsResource};
pub use partners::{PartnerManager, PartnerResource};
pub use programs::{ProgramManager, ProgramResource};
pub use resource::{Modal, Notifier, Phase, Resource, ResourceManager};
pub use tenders::{TenderManager, TenderResource};
