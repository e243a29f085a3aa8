//! Builders for constructing request bodies and query strings.
//!
//! These are pure data; they validate and marshal parameters but perform no
//! I/O themselves.

mod search_messages;

pub use self::search_messages::*;
