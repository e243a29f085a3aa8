//! Mappings of objects received from the API, with optional helper methods
//! for ease of use.
//!
//! Models can optionally have additional helper methods implemented, to
//! facilitate commonly-needed behaviour without having to go through the
//! entity directory by hand.

mod utils;

pub mod application;
pub mod channel;
pub mod guild;
pub mod id;
pub mod monetization;
pub mod permissions;
pub mod prelude;
pub mod search;
pub mod user;

pub use self::permissions::Permissions;
