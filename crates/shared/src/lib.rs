//! Shared types and configuration for Granary.
//!
//! This crate provides common types used across all other crates:
//! - Typed account identifiers and card numbers
//! - Amount parsing and validation with decimal precision
//! - Tagged account references for lookup
//! - Configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, OwnerPolicy};
pub use types::{AccountId, AccountRef, AmountError, CardNumber};
