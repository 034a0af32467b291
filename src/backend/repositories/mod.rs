//! Backend repositories module
//!
//! This module contains typed wrappers around the backend functions

pub mod group;
pub mod message;
pub mod greeting;

pub use group::GroupRepository;
pub use message::MessageRepository;
pub use greeting::GreetingRepository;
