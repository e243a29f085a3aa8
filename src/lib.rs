//! # accord
//!
//! A library for materializing Discord interaction events into fully resolved
//! values.
//!
//! An interaction payload arrives as loosely coupled JSON: ids, partial
//! channel and member objects, and optional fields that vary by where the
//! interaction was invoked. The [`InteractionMaterializer`] resolves all of
//! it against an [`EntityDirectory`] (by default the in-memory [`Cache`])
//! and produces an [`Interaction`] whose accessors are plain reads.
//!
//! ```rust
//! use accord::prelude::*;
//!
//! let cache = Cache::new();
//! let materializer = InteractionMaterializer::new();
//!
//! let payload: InteractionPayload = serde_json::from_str(
//!     r#"{
//!         "id": "123",
//!         "type": 2,
//!         "token": "tok",
//!         "channel": {"id": "55", "type": 1},
//!         "user": {"id": "99", "username": "invoker"}
//!     }"#,
//! )?;
//!
//! let interaction = materializer.materialize(&cache, payload)?;
//! assert!(interaction.is_direct());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Interaction`]: crate::model::application::Interaction
//! [`InteractionMaterializer`]: crate::materializer::InteractionMaterializer
//! [`EntityDirectory`]: crate::cache::EntityDirectory
//! [`Cache`]: crate::cache::Cache
#![doc(html_root_url = "https://docs.rs/accord/*")]
#![forbid(unsafe_code)]
#![warn(clippy::missing_errors_doc, clippy::unused_self, rust_2018_idioms)]

#[macro_use]
mod internal;

pub mod builder;
pub mod cache;
pub mod error;
pub mod materializer;
pub mod model;
pub mod prelude;

pub use crate::error::{Error, Result};
