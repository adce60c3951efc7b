//! MailTrust Common - Shared types and utilities
//!
//! This crate provides the error type, configuration, logging bootstrap
//! and identifier types shared across all MailTrust components.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
