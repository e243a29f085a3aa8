use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{AuthorizingIntegrationOwners, InteractionContextType};
use crate::model::channel::Channel;
use crate::model::guild::{Guild, Member};
use crate::model::id::{ChannelId, InteractionId};
use crate::model::monetization::Entitlement;
use crate::model::user::User;
use crate::model::Permissions;

/// The locale reported when a payload does not carry one.
pub const DEFAULT_LOCALE: &str = "en-US";

enum_number! {
    /// The type of an interaction.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionType {
        /// A ping sent to verify the application's endpoint.
        Ping = 1,
        /// An invocation of an application command.
        Command = 2,
        /// An invocation of a message component, such as a button.
        Component = 3,
        /// A request for command option autocompletion.
        Autocomplete = 4,
        /// A modal submission.
        Modal = 5,
        _ => Unknown(u8),
    }
}

/// Whether an interaction happened inside a guild or in a direct message, and
/// the entities that only exist in one of the two cases.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum InteractionScope {
    /// The interaction happened in a guild channel or thread.
    Guild {
        /// The guild the interaction happened in.
        guild: Guild,
        /// The invoking user's membership in that guild.
        member: Member,
    },
    /// The interaction happened in a direct message.
    Direct,
}

/// A fully materialized interaction event.
///
/// All referenced entities have been resolved against the entity directory,
/// so accessors here are plain reads with no fallible lookups left.
#[derive(Debug)]
#[non_exhaustive]
pub struct Interaction {
    pub(crate) id: InteractionId,
    pub(crate) kind: InteractionType,
    pub(crate) token: SecretString,
    pub(crate) channel_id: ChannelId,
    pub(crate) scope: InteractionScope,
    pub(crate) user: User,
    pub(crate) channel: Channel,
    pub(crate) locale: String,
    pub(crate) context: Option<InteractionContextType>,
    pub(crate) integration_owners: Option<AuthorizingIntegrationOwners>,
    pub(crate) user_permissions: Option<Permissions>,
    pub(crate) app_permissions: Option<Permissions>,
    pub(crate) entitlements: Vec<Entitlement>,
    pub(crate) acknowledged: AtomicBool,
}

impl Interaction {
    /// The unique Id of the interaction.
    #[must_use]
    pub fn id(&self) -> InteractionId {
        self.id
    }

    /// The type of the interaction.
    #[must_use]
    pub fn kind(&self) -> InteractionType {
        self.kind
    }

    /// The token used to respond to the interaction.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// The Id of the channel the interaction was sent from.
    #[must_use]
    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// The channel the interaction was sent from.
    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// The scope the interaction happened in.
    #[must_use]
    pub fn scope(&self) -> &InteractionScope {
        &self.scope
    }

    /// The guild the interaction happened in, if any.
    #[must_use]
    pub fn guild(&self) -> Option<&Guild> {
        match &self.scope {
            InteractionScope::Guild { guild, .. } => Some(guild),
            InteractionScope::Direct => None,
        }
    }

    /// The invoking user's membership in the guild the interaction happened
    /// in, if any.
    #[must_use]
    pub fn member(&self) -> Option<&Member> {
        match &self.scope {
            InteractionScope::Guild { member, .. } => Some(member),
            InteractionScope::Direct => None,
        }
    }

    /// Whether the interaction happened in a direct message.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        matches!(self.scope, InteractionScope::Direct)
    }

    /// The user that invoked the interaction.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The selected language of the invoking user.
    ///
    /// Defaults to [`DEFAULT_LOCALE`] for payloads that carry no locale, such
    /// as pings.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The context the interaction was invoked from, when reported.
    #[must_use]
    pub fn context(&self) -> Option<InteractionContextType> {
        self.context
    }

    /// The installation contexts the application was authorized through.
    #[must_use]
    pub fn integration_owners(&self) -> Option<&AuthorizingIntegrationOwners> {
        self.integration_owners.as_ref()
    }

    /// Permissions of the invoking user within the channel, when reported.
    #[must_use]
    pub fn user_permissions(&self) -> Option<Permissions> {
        self.user_permissions
    }

    /// Permissions of the application within the channel, when reported.
    #[must_use]
    pub fn app_permissions(&self) -> Option<Permissions> {
        self.app_permissions
    }

    /// Entitlements granted to the invoking user or their guild.
    #[must_use]
    pub fn entitlements(&self) -> &[Entitlement] {
        &self.entitlements
    }

    /// Marks the interaction as acknowledged, returning whether it already
    /// was.
    ///
    /// Exactly one caller across all threads observes `false`; that caller
    /// owns sending the initial response. Responding twice would fail the
    /// request, and not responding at all shows the invoker an error.
    pub fn ack(&self) -> bool {
        self.acknowledged.swap(true, Ordering::SeqCst)
    }

    /// Whether the interaction has been acknowledged.
    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }
}
