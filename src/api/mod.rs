//! API client module for the Swarmy backend.
//!
//! Provides the HTTP client with its interceptor pipeline, the error type,
//! request/response types, and one module of thin endpoint functions per
//! backend resource.

pub mod auth;
pub mod billing;
pub mod client;
pub mod error;
pub mod feeds;
pub mod files;
pub mod keys;
pub mod middleware;
pub mod pages;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
