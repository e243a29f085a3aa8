//! A set of exports for the types most commonly needed when consuming
//! interactions.

pub use crate::builder::SearchMessages;
pub use crate::cache::{Cache, DirectoryError, EntityDirectory, Settings};
pub use crate::error::{Error, Result};
pub use crate::materializer::{ContextPolicy, InteractionMaterializer, InteractionPayload};
pub use crate::model::prelude::*;
