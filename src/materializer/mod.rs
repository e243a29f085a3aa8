//! Turns raw interaction payloads into fully resolved [`Interaction`] values.
//!
//! Materialization is the only write path into the entity directory that this
//! library drives itself: members, private channels, users, threads and
//! entitlements referenced by a payload are upserted as a side effect of
//! resolving it.

mod channel;
mod context;
mod user;

use std::sync::atomic::AtomicBool;

use secrecy::SecretString;
use serde::Deserialize;

pub use self::context::ContextPolicy;
use crate::cache::{DirectoryError, EntityDirectory};
use crate::internal::prelude::*;
use crate::model::application::{
    AuthorizingIntegrationOwners, Interaction, InteractionScope, InteractionType, DEFAULT_LOCALE,
};
use crate::model::channel::{Channel, PartialChannel};
use crate::model::guild::PartialMember;
use crate::model::id::{ChannelId, GuildId, InteractionId};
use crate::model::monetization::Entitlement;
use crate::model::user::User;
use crate::model::Permissions;

/// The wire shape of an interaction event, before any entity resolution.
#[derive(Debug, Deserialize)]
#[non_exhaustive]
pub struct InteractionPayload {
    /// The unique Id of the interaction.
    pub id: InteractionId,
    /// The type of the interaction.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// The token used to respond to the interaction.
    pub token: SecretString,
    /// The Id of the guild the interaction was sent from. Zero or absent for
    /// direct messages.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// The Id of the channel the interaction was sent from, when sent
    /// separately from the channel object.
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    /// The channel the interaction was sent from.
    pub channel: PartialChannel,
    /// The invoking member, for interactions sent from a guild.
    #[serde(default)]
    pub member: Option<PartialMember>,
    /// The invoking user, for interactions sent from a direct message.
    #[serde(default)]
    pub user: Option<User>,
    /// The selected language of the invoking user.
    #[serde(default)]
    pub locale: Option<String>,
    /// The context the interaction was invoked from.
    #[serde(default)]
    pub context: Option<String>,
    /// The installation contexts the application was authorized through.
    #[serde(default)]
    pub authorizing_integration_owners: Option<AuthorizingIntegrationOwners>,
    /// Permissions of the application within the channel.
    #[serde(default)]
    pub app_permissions: Option<Permissions>,
    /// Entitlements of the invoking user or their guild.
    #[serde(default)]
    pub entitlements: Vec<Entitlement>,
}

/// Resolves interaction payloads against an [`EntityDirectory`].
///
/// The materializer itself is stateless; it can be shared freely and used
/// from multiple threads at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionMaterializer {
    context_policy: ContextPolicy,
}

impl InteractionMaterializer {
    /// Creates a materializer with the default [`ContextPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a materializer with the given context policy.
    #[must_use]
    pub fn with_context_policy(context_policy: ContextPolicy) -> Self {
        Self {
            context_policy,
        }
    }

    /// Materializes a payload into an [`Interaction`], registering every
    /// entity the payload references in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directory`] when the payload names a guild the
    /// directory does not hold, [`Error::MissingField`] when a scope-required
    /// sub-object is absent, [`Error::ChannelResolution`] when a non-thread
    /// guild channel cannot be found, [`Error::UnsupportedChannelType`] for
    /// group or otherwise unsupported direct channels, and
    /// [`Error::MissingContext`] under [`ContextPolicy::Required`].
    pub fn materialize(
        &self,
        directory: &dyn EntityDirectory,
        payload: InteractionPayload,
    ) -> Result<Interaction> {
        // A zero guild id is how some payloads spell "no guild".
        let guild_id = payload.guild_id.filter(|id| id.get() != 0);

        let (scope, channel, user) = match guild_id {
            Some(guild_id) => {
                let guild = directory
                    .guild(guild_id)
                    .ok_or(DirectoryError::GuildNotFound(guild_id))?;
                let member = payload.member.as_ref().ok_or(Error::MissingField("member"))?;
                let member = directory.create_or_update_member(guild_id, member)?;
                let channel = channel::resolve_guild(directory, guild_id, &payload.channel)?;
                let user = member.user.clone();

                (
                    InteractionScope::Guild {
                        guild,
                        member,
                    },
                    Channel::Guild(channel),
                    user,
                )
            },
            None => {
                let recipient = payload.user.as_ref().ok_or(Error::MissingField("user"))?;
                let channel = channel::resolve_private(directory, &payload.channel, recipient)?;
                let (channel, user) = user::resolve_private(directory, channel, recipient)?;

                (InteractionScope::Direct, Channel::Private(channel), user)
            },
        };

        // Context and integration metadata come after entity resolution, so
        // scope and channel failures surface first.
        let context = context::resolve(payload.context.as_deref(), self.context_policy)?;

        let entitlements = payload
            .entitlements
            .iter()
            .map(|entitlement| directory.create_entitlement(entitlement))
            .collect::<StdResult<Vec<_>, DirectoryError>>()?;

        Ok(Interaction {
            id: payload.id,
            kind: payload.kind,
            token: payload.token,
            channel_id: payload.channel_id.unwrap_or(payload.channel.id),
            scope,
            user,
            channel,
            locale: payload.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            context,
            integration_owners: payload.authorizing_integration_owners,
            user_permissions: payload.channel.permissions,
            app_permissions: payload.app_permissions,
            entitlements,
            acknowledged: AtomicBool::new(false),
        })
    }
}
