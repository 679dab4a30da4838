//! Client library for the Swarmy storage service.
//!
//! The core is the authenticated API client (`api`), the session and profile
//! stores it keeps in sync (`store`, `state`), the guard between public and
//! protected routes (`router`), and the per-load profile bootstrap
//! (`bootstrap`). `cli` and `commands` put a command-line front end on top.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod router;
pub mod state;
pub mod store;
pub mod validation;
