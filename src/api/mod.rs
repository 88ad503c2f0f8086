//! HTTP layer: handlers, middleware and session tokens

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
