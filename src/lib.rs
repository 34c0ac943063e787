//! A small HTTP/1.1 greeting server.
//!
//! Serves two fixed plain-text endpoints (`/` and `/evening`) with
//! generic 404/405 fallbacks. Built on tokio and hyper.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
