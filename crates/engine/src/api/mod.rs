//! HTTP API for the child app and the parent dashboard.

pub mod auth;
pub mod error;
pub mod http;
