//! Herald - tiered email content generation
//!
//! Turns a free-text prompt into an email subject and body. Generative
//! backends are tried in configured order; when none of them produce
//! usable content the best-matching static template is rendered instead,
//! so callers always get a message back.

pub mod api;
pub mod backend;
pub mod cascade;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod template;
