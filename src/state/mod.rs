//! State management module
//!
//! This module handles device-local state and the per-session context

pub mod context;
pub mod draft;
pub mod identity;
pub mod storage;

// Re-export commonly used state components
pub use context::SessionContext;
pub use draft::{DraftState, SendState};
pub use identity::{IdentityResolution, IdentityResolver, IDENTITY_KEY};
pub use storage::LocalStorage;
