//! The model prelude re-exports all types in the model modules.
//!
//! This allows for quick and easy access to all of the model types.

pub use super::application::*;
pub use super::channel::*;
pub use super::guild::*;
pub use super::id::*;
pub use super::monetization::*;
pub use super::permissions::*;
pub use super::search::*;
pub use super::user::*;
