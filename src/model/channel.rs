//! Models for channels of all kinds, plus the minimal message shape returned
//! by the search endpoint.

use serde::{Deserialize, Serialize};

use super::id::{ChannelId, GuildId, MessageId};
use super::permissions::Permissions;
use super::user::User;

enum_number! {
    /// A representation of a type of channel.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ChannelType {
        /// A text channel within a guild.
        Text = 0,
        /// A direct message channel with another user.
        Private = 1,
        /// A voice channel within a guild.
        Voice = 2,
        /// A group direct message channel.
        GroupDm = 3,
        /// An organizational category containing other channels.
        Category = 4,
        /// An announcement channel within a guild.
        News = 5,
        /// A thread hanging off an announcement channel.
        NewsThread = 10,
        /// A publicly viewable thread within a text channel.
        PublicThread = 11,
        /// A thread viewable only by its members and moderators.
        PrivateThread = 12,
        /// A channel containing only threads.
        Forum = 15,
        _ => Unknown(u8),
    }
}

impl ChannelType {
    /// Whether this channel type is one of the thread kinds.
    ///
    /// Threads referenced by an interaction may legitimately be absent from
    /// the local cache and get fabricated on demand.
    #[must_use]
    pub const fn is_thread(self) -> bool {
        matches!(self, Self::NewsThread | Self::PublicThread | Self::PrivateThread)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Private => "private",
            Self::Voice => "voice",
            Self::GroupDm => "group_dm",
            Self::Category => "category",
            Self::News => "news",
            Self::NewsThread => "news_thread",
            Self::PublicThread => "public_thread",
            Self::PrivateThread => "private_thread",
            Self::Forum => "forum",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A channel within a guild. Threads share this representation; they are
/// distinguished by [`ChannelType::is_thread`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct GuildChannel {
    /// The unique Id of the channel.
    pub id: ChannelId,
    /// The Id of the guild the channel is located in.
    #[serde(default)]
    pub guild_id: GuildId,
    /// Indicator of the type of channel this is.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The name of the channel.
    #[serde(default)]
    pub name: String,
    /// The Id of the parent category or, for threads, the text channel the
    /// thread belongs to.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    /// Computed permissions of the invoking user in this channel, when the
    /// payload carries them.
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

/// A direct message channel with a single recipient.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct PrivateChannel {
    /// The unique Id of the private channel.
    ///
    /// Can be used to calculate the first message's creation date.
    pub id: ChannelId,
    /// Indicator of the type of channel this is.
    ///
    /// This should always be [`ChannelType::Private`].
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The recipient of the private channel, once resolved. `None` only for
    /// channels cached before their user was seen.
    #[serde(default)]
    pub recipient: Option<User>,
}

impl PrivateChannel {
    /// Returns "DM with $tag", or just "DM" while the recipient is unknown.
    #[must_use]
    pub fn name(&self) -> String {
        match &self.recipient {
            Some(user) => format!("DM with {}", user.tag()),
            None => "DM".to_string(),
        }
    }
}

/// A container for any channel an interaction can occur in.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Channel {
    /// A channel (or thread) within a guild.
    Guild(GuildChannel),
    /// A direct message channel.
    Private(PrivateChannel),
}

impl Channel {
    /// The unique Id of the inner channel.
    #[must_use]
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Guild(channel) => channel.id,
            Self::Private(channel) => channel.id,
        }
    }

    /// The type of the inner channel.
    #[must_use]
    pub fn kind(&self) -> ChannelType {
        match self {
            Self::Guild(channel) => channel.kind,
            Self::Private(channel) => channel.kind,
        }
    }

    /// Converts this to a [`GuildChannel`] reference, if it is one.
    #[must_use]
    pub fn guild(&self) -> Option<&GuildChannel> {
        match self {
            Self::Guild(channel) => Some(channel),
            Self::Private(_) => None,
        }
    }

    /// Converts this to a [`PrivateChannel`] reference, if it is one.
    #[must_use]
    pub fn private(&self) -> Option<&PrivateChannel> {
        match self {
            Self::Private(channel) => Some(channel),
            Self::Guild(_) => None,
        }
    }

    /// Whether the inner channel is a thread.
    #[must_use]
    pub fn is_thread(&self) -> bool {
        self.kind().is_thread()
    }
}

/// The `channel` sub-object of an interaction payload.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct PartialChannel {
    /// The unique Id of the channel.
    pub id: ChannelId,
    /// Indicator of the type of channel this is.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The name of the channel, when sent.
    #[serde(default)]
    pub name: Option<String>,
    /// For threads, the text channel the thread belongs to.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    /// Computed permissions of the invoking user in this channel, when the
    /// payload carries them.
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

/// A message returned by the search endpoint. Only the fields search results
/// are guaranteed to carry are modelled.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message.
    pub id: MessageId,
    /// The Id of the channel the message was sent in.
    pub channel_id: ChannelId,
    /// The user that sent the message.
    pub author: User,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Indicator of whether the message is pinned in its channel.
    #[serde(default)]
    pub pinned: bool,
}
