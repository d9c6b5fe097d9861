//! In-memory state layer for Granary.
//!
//! Persistence technology is an external concern; this crate is the
//! in-process store the ledger runs against. It provides:
//! - The account directory (identifier allocation and lookup indices)
//! - The ledger application layer that owns locking and atomicity
//! - User credential storage for the auth collaborator
//! - Session token storage

pub mod directory;
pub mod error;
pub mod ledger;
pub mod session;
pub mod user;

pub use directory::Directory;
pub use error::{DirectoryError, OperationError, UserError};
pub use ledger::Ledger;
pub use session::{Session, SessionStore};
pub use user::{UserRecord, UserStore};
