//! EALI Portal - client library for the EALI institutional website backend
//!
//! This library provides the session, HTTP client and services used by the
//! public site and the admin console.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
