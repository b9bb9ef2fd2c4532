//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `Session`: the single-writer session store with sign-in/out,
//!   restore, and recovery operations
//! - `TokenStore`: persistence for the bearer token pair
//! - `InactivityMonitor`: forced logout after 15 minutes without input
//!
//! Tokens are the only persisted auth state; the session itself lives in
//! memory for the lifetime of the process.

pub mod inactivity;
pub mod session;
pub mod tokens;

pub use inactivity::InactivityMonitor;
pub use session::{AuthUser, OpOutcome, Role, Session, SignInOutcome};
pub use tokens::TokenStore;
