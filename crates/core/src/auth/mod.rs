//! Authentication primitives for the surrounding auth collaborator.
//!
//! The ledger itself does no authentication; this module only provides the
//! password-hashing floor the API layer builds on. Plain-text password
//! storage is deliberately impossible to reach from here.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
