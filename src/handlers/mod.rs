//! Presentation handlers module
//!
//! View models consumed by a front end:
//! - Thread rendering (bubbles, auto-scroll)
//! - Shell command parsing for the terminal front end

pub mod commands;
pub mod thread;

pub use commands::{parse, ShellCommand};
pub use thread::{AutoScroll, Bubble, MessageListRenderer, Ownership, ownership};
