use tracing::warn;

use crate::internal::prelude::*;
use crate::model::application::InteractionContextType;

/// How to handle payloads that carry no `context` field.
///
/// Older payloads predate the field, so it cannot be assumed present.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ContextPolicy {
    /// Materialize the interaction without a context.
    #[default]
    Nullable,
    /// Fail materialization with [`Error::MissingContext`].
    Required,
}

pub(super) fn resolve(
    context: Option<&str>,
    policy: ContextPolicy,
) -> Result<Option<InteractionContextType>> {
    match context {
        Some(key) => Ok(Some(InteractionContextType::from_key(key))),
        None => match policy {
            ContextPolicy::Nullable => {
                warn!("interaction payload carries no context; treating it as unset");

                Ok(None)
            },
            ContextPolicy::Required => Err(Error::MissingContext),
        },
    }
}
