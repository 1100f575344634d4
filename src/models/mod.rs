//! Data models
//!
//! This module contains all data structures exchanged with the CMS backend.
//! Models represent:
//! - Content entities (NewsItem, Tender, Partner, Program)
//! - Admin form inputs (NewsInput, TenderInput, PartnerInput, ProgramInput)
//! - Authentication payloads and the session user

mod language;
mod message;
mod news;
mod partner;
mod program;
mod stats;
mod tender;
mod user;

pub use language::Language;
pub use message::ContactMessage;
pub use news::{NewsInput, NewsItem, DEFAULT_NEWS_CATEGORY};
pub use partner::{Partner, PartnerInput, PartnerType};
pub use program::{
    join_options, split_options, Program, ProgramDetails, ProgramIcon, ProgramInput, ProgramType,
};
pub use stats::DashboardStats;
pub use tender::{Tender, TenderInput};
pub use user::{LoginInput, LoginResponse, RegisterInput, SessionUser};
