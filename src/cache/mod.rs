//! A cache of entities received from the API.
//!
//! The materializer does not talk to this cache directly; it goes through the
//! [`EntityDirectory`] trait, of which [`Cache`] is the in-memory
//! implementation. Deployments with external state can supply their own
//! directory instead.

use std::error::Error as StdError;
use std::fmt;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fxhash::FxBuildHasher;
use parking_lot::RwLock;

pub use self::settings::Settings;
use crate::internal::prelude::*;
use crate::model::channel::{ChannelType, GuildChannel, PartialChannel, PrivateChannel};
use crate::model::guild::{Guild, Member, PartialMember};
use crate::model::id::{ChannelId, EntitlementId, GuildId, UserId};
use crate::model::monetization::Entitlement;
use crate::model::user::User;

mod settings;

/// An error returned by an [`EntityDirectory`] when a required entity cannot
/// be produced.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DirectoryError {
    /// The directory holds no guild with the given Id.
    GuildNotFound(GuildId),
    /// The directory holds no private channel with the given Id.
    PrivateChannelNotFound(ChannelId),
    /// A member payload carried no embedded user to resolve.
    MissingUser,
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuildNotFound(id) => write!(f, "Unknown guild: {id}"),
            Self::PrivateChannelNotFound(id) => write!(f, "Unknown private channel: {id}"),
            Self::MissingUser => f.write_str("Member payload is missing its user"),
        }
    }
}

impl StdError for DirectoryError {}

/// A source of entities referenced by interaction payloads.
///
/// `create_*` methods are upserts: they return the already-stored entity when
/// one exists, and otherwise store and return the given one. Implementations
/// must make each upsert atomic per key, so that concurrent calls for the
/// same Id yield one entity.
pub trait EntityDirectory: Send + Sync {
    /// Looks up a guild by Id.
    fn guild(&self, id: GuildId) -> Option<Guild>;

    /// Looks up a channel by Id, scoped to a guild. A channel stored under a
    /// different guild is not returned.
    fn guild_channel(&self, guild_id: GuildId, id: ChannelId) -> Option<GuildChannel>;

    /// Registers a thread seen in a payload but absent from the directory.
    fn create_thread_channel(
        &self,
        guild_id: GuildId,
        channel: &PartialChannel,
    ) -> StdResult<GuildChannel, DirectoryError>;

    /// Looks up a private channel by Id.
    fn private_channel(&self, id: ChannelId) -> Option<PrivateChannel>;

    /// Registers a private channel with the given recipient.
    fn create_private_channel(
        &self,
        id: ChannelId,
        recipient: &User,
    ) -> StdResult<PrivateChannel, DirectoryError>;

    /// Sets the recipient of an already-stored private channel, linking user
    /// and channel both ways.
    ///
    /// Returns the channel and its recipient as stored afterwards; when a
    /// concurrent caller linked a recipient first, that recipient is the one
    /// returned.
    fn link_private_recipient(
        &self,
        id: ChannelId,
        recipient: &User,
    ) -> StdResult<(PrivateChannel, User), DirectoryError>;

    /// Registers or updates a guild member from an interaction payload.
    fn create_or_update_member(
        &self,
        guild_id: GuildId,
        member: &PartialMember,
    ) -> StdResult<Member, DirectoryError>;

    /// Registers or updates a user.
    fn create_user(&self, user: &User) -> StdResult<User, DirectoryError>;

    /// Registers an entitlement.
    fn create_entitlement(&self, entitlement: &Entitlement)
        -> StdResult<Entitlement, DirectoryError>;
}

/// An in-memory [`EntityDirectory`] backed by sharded concurrent maps.
///
/// Lock order within a single call is always the private channel entry
/// first, then the user map. Never take them in the other order.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Cache {
    pub(crate) guilds: DashMap<GuildId, Guild, FxBuildHasher>,
    pub(crate) channels: DashMap<ChannelId, GuildChannel, FxBuildHasher>,
    pub(crate) private_channels: DashMap<ChannelId, PrivateChannel, FxBuildHasher>,
    pub(crate) users: DashMap<UserId, User, FxBuildHasher>,
    pub(crate) entitlements: DashMap<EntitlementId, Entitlement, FxBuildHasher>,
    settings: RwLock<Settings>,
}

impl Cache {
    /// Creates a new cache with default [`Settings`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new cache with the given settings.
    #[must_use]
    pub fn new_with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            ..Default::default()
        }
    }

    /// Returns a copy of the cache's settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Stores a guild, returning the previously stored one if any.
    pub fn insert_guild(&self, guild: Guild) -> Option<Guild> {
        self.guilds.insert(guild.id, guild)
    }

    /// Stores a guild channel, returning the previously stored one if any.
    pub fn insert_guild_channel(&self, channel: GuildChannel) -> Option<GuildChannel> {
        self.channels.insert(channel.id, channel)
    }

    /// Stores a private channel, returning the previously stored one if any.
    ///
    /// When the channel carries a recipient, the recipient is stored with its
    /// backlink set.
    pub fn insert_private_channel(&self, mut channel: PrivateChannel) -> Option<PrivateChannel> {
        if let Some(recipient) = channel.recipient.take() {
            let mut recipient = recipient;
            recipient.private_channel_id = Some(channel.id);
            channel.recipient = Some(self.store_user(&recipient));
        }

        self.private_channels.insert(channel.id, channel)
    }

    /// Stores a user, returning the previously stored one if any.
    pub fn insert_user(&self, user: User) -> Option<User> {
        self.users.insert(user.id, user)
    }

    /// Looks up a user by Id.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|user| user.clone())
    }

    /// Looks up an entitlement by Id.
    #[must_use]
    pub fn entitlement(&self, id: EntitlementId) -> Option<Entitlement> {
        self.entitlements.get(&id).map(|entitlement| entitlement.clone())
    }

    /// The number of cached guilds.
    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// The number of cached private channels.
    #[must_use]
    pub fn private_channel_count(&self) -> usize {
        self.private_channels.len()
    }

    /// The number of cached users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // Stores the user unless user caching is disabled, preserving a stored
    // private channel backlink over an absent incoming one.
    fn store_user(&self, user: &User) -> User {
        if !self.settings.read().cache_users {
            return user.clone();
        }

        let mut entry = self.users.entry(user.id).or_insert_with(|| user.clone());
        let backlink = entry.private_channel_id.or(user.private_channel_id);
        *entry = user.clone();
        entry.private_channel_id = backlink;

        entry.clone()
    }
}

impl EntityDirectory for Cache {
    fn guild(&self, id: GuildId) -> Option<Guild> {
        self.guilds.get(&id).map(|guild| guild.clone())
    }

    fn guild_channel(&self, guild_id: GuildId, id: ChannelId) -> Option<GuildChannel> {
        self.channels
            .get(&id)
            .and_then(|channel| (channel.guild_id == guild_id).then(|| channel.clone()))
    }

    fn create_thread_channel(
        &self,
        guild_id: GuildId,
        channel: &PartialChannel,
    ) -> StdResult<GuildChannel, DirectoryError> {
        match self.channels.entry(channel.id) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let fabricated = GuildChannel {
                    id: channel.id,
                    guild_id,
                    kind: channel.kind,
                    name: channel.name.clone().unwrap_or_default(),
                    parent_id: channel.parent_id,
                    permissions: channel.permissions,
                };
                entry.insert(fabricated.clone());

                Ok(fabricated)
            },
        }
    }

    fn private_channel(&self, id: ChannelId) -> Option<PrivateChannel> {
        self.private_channels.get(&id).map(|channel| channel.clone())
    }

    fn create_private_channel(
        &self,
        id: ChannelId,
        recipient: &User,
    ) -> StdResult<PrivateChannel, DirectoryError> {
        match self.private_channels.entry(id) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let mut recipient = recipient.clone();
                recipient.private_channel_id = Some(id);

                let channel = PrivateChannel {
                    id,
                    kind: ChannelType::Private,
                    recipient: Some(self.store_user(&recipient)),
                };
                entry.insert(channel.clone());

                Ok(channel)
            },
        }
    }

    fn link_private_recipient(
        &self,
        id: ChannelId,
        recipient: &User,
    ) -> StdResult<(PrivateChannel, User), DirectoryError> {
        let mut entry = self
            .private_channels
            .get_mut(&id)
            .ok_or(DirectoryError::PrivateChannelNotFound(id))?;

        if let Some(existing) = &entry.recipient {
            // A concurrent caller linked first; their recipient wins.
            return Ok((entry.clone(), existing.clone()));
        }

        let mut recipient = recipient.clone();
        recipient.private_channel_id = Some(id);
        let recipient = self.store_user(&recipient);
        entry.recipient = Some(recipient.clone());

        Ok((entry.clone(), recipient))
    }

    fn create_or_update_member(
        &self,
        guild_id: GuildId,
        member: &PartialMember,
    ) -> StdResult<Member, DirectoryError> {
        let user = member.user.clone().ok_or(DirectoryError::MissingUser)?;
        let user = self.store_user(&user);

        let member = Member {
            user,
            guild_id,
            nick: member.nick.clone(),
            roles: member.roles.clone(),
        };

        let mut guild = self.guilds.get_mut(&guild_id).ok_or(DirectoryError::GuildNotFound(guild_id))?;
        guild.members.insert(member.user.id, member.clone());

        Ok(member)
    }

    fn create_user(&self, user: &User) -> StdResult<User, DirectoryError> {
        Ok(self.store_user(user))
    }

    fn create_entitlement(
        &self,
        entitlement: &Entitlement,
    ) -> StdResult<Entitlement, DirectoryError> {
        match self.entitlements.entry(entitlement.id) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(entitlement.clone());

                Ok(entitlement.clone())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;

    fn user(id: u64, name: &str) -> User {
        User {
            id: UserId::new(id),
            name: name.to_string(),
            discriminator: 0,
            bot: false,
            private_channel_id: None,
        }
    }

    fn guild(id: u64) -> Guild {
        Guild {
            id: GuildId::new(id),
            name: "guild".to_string(),
            owner_id: UserId::new(1),
            members: HashMap::new(),
        }
    }

    #[test]
    fn guild_channel_is_scoped_to_its_guild() {
        let cache = Cache::new();
        cache.insert_guild_channel(GuildChannel {
            id: ChannelId::new(5),
            guild_id: GuildId::new(1),
            kind: ChannelType::Text,
            name: "general".to_string(),
            parent_id: None,
            permissions: None,
        });

        assert!(cache.guild_channel(GuildId::new(1), ChannelId::new(5)).is_some());
        assert!(cache.guild_channel(GuildId::new(2), ChannelId::new(5)).is_none());
    }

    #[test]
    fn create_private_channel_links_both_ways() {
        let cache = Cache::new();
        let channel = cache.create_private_channel(ChannelId::new(9), &user(3, "ana")).unwrap();

        let recipient = channel.recipient.as_ref().unwrap();
        assert_eq!(recipient.id, UserId::new(3));
        assert_eq!(recipient.private_channel_id, Some(ChannelId::new(9)));
        assert_eq!(
            cache.user(UserId::new(3)).unwrap().private_channel_id,
            Some(ChannelId::new(9))
        );
    }

    #[test]
    fn concurrent_private_channel_creation_yields_one_entity() {
        let cache = Arc::new(Cache::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache
                        .create_private_channel(ChannelId::new(9), &user(3, &format!("u{n}")))
                        .unwrap()
                })
            })
            .collect();

        let channels: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.private_channel_count(), 1);
        let stored = cache.private_channel(ChannelId::new(9)).unwrap();
        for channel in channels {
            assert_eq!(channel, stored);
        }
    }

    #[test]
    fn link_keeps_first_recipient() {
        let cache = Cache::new();
        cache.insert_private_channel(PrivateChannel {
            id: ChannelId::new(9),
            kind: ChannelType::Private,
            recipient: None,
        });

        let (_, first) = cache.link_private_recipient(ChannelId::new(9), &user(3, "ana")).unwrap();
        let (channel, second) =
            cache.link_private_recipient(ChannelId::new(9), &user(4, "bob")).unwrap();

        assert_eq!(first.id, UserId::new(3));
        assert_eq!(second.id, UserId::new(3));
        assert_eq!(channel.recipient.unwrap().id, UserId::new(3));
    }

    #[test]
    fn link_requires_an_existing_channel() {
        let cache = Cache::new();

        assert_eq!(
            cache.link_private_recipient(ChannelId::new(9), &user(3, "ana")),
            Err(DirectoryError::PrivateChannelNotFound(ChannelId::new(9)))
        );
    }

    #[test]
    fn member_update_replaces_previous_entry() {
        let cache = Cache::new();
        cache.insert_guild(guild(1));

        let first = PartialMember {
            user: Some(user(3, "ana")),
            nick: None,
            roles: vec![],
        };
        let second = PartialMember {
            user: Some(user(3, "ana")),
            nick: Some("moderator".to_string()),
            roles: vec![],
        };

        cache.create_or_update_member(GuildId::new(1), &first).unwrap();
        let member = cache.create_or_update_member(GuildId::new(1), &second).unwrap();

        assert_eq!(member.nick.as_deref(), Some("moderator"));
        let stored = cache.guild(GuildId::new(1)).unwrap();
        assert_eq!(stored.members[&UserId::new(3)].nick.as_deref(), Some("moderator"));
    }

    #[test]
    fn member_without_user_is_rejected() {
        let cache = Cache::new();
        cache.insert_guild(guild(1));

        let member = PartialMember {
            user: None,
            nick: None,
            roles: vec![],
        };

        assert_eq!(
            cache.create_or_update_member(GuildId::new(1), &member),
            Err(DirectoryError::MissingUser)
        );
    }

    #[test]
    fn disabled_user_caching_skips_retention() {
        let cache = Cache::new_with_settings(Settings {
            cache_users: false,
        });

        let stored = cache.create_user(&user(3, "ana")).unwrap();

        assert_eq!(stored.id, UserId::new(3));
        assert_eq!(cache.user_count(), 0);
    }
}
