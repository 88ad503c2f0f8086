//! Clinilead - lead capture backend for a bilingual clinic-management SaaS
//!
//! This library provides the core functionality of the service: landing page
//! lead intake with validation and attribution capture, page view tracking,
//! and the session-gated admin API with dashboard aggregates.
//!
//! # Architecture
//! - `api`: HTTP handlers, auth middleware and session tokens
//! - `services`: validation, attribution, lead, dashboard, auth, tracking
//! - `storage`: SeaORM backends and domain models
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
