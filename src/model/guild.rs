//! Models pertaining to guilds and their members.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::{GuildId, RoleId, UserId};
use super::user::User;
use super::utils::{deserialize_members, serialize_members};

/// A community of channels and members.
///
/// Only the data the interaction path needs is modelled; the platform sends
/// far more on guild creation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Guild {
    /// The unique Id identifying the guild.
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The Id of the user who owns the guild.
    pub owner_id: UserId,
    /// Members of the guild the library has received data for, keyed by
    /// user Id.
    #[serde(
        default,
        serialize_with = "serialize_members",
        deserialize_with = "deserialize_members"
    )]
    pub members: HashMap<UserId, Member>,
}

/// A resolved member of a guild.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Member {
    /// The user the member represents.
    pub user: User,
    /// The guild the member belongs to. Absent from wire payloads, filled in
    /// during resolution.
    #[serde(default)]
    pub guild_id: GuildId,
    /// The member's guild-specific nickname, if set.
    #[serde(default)]
    pub nick: Option<String>,
    /// Ids of the roles granted to the member.
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

/// The `member` sub-object of an interaction payload. The embedded `user` is
/// optional on the wire, so this cannot be a [`Member`] yet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct PartialMember {
    /// The user the member represents, when embedded.
    #[serde(default)]
    pub user: Option<User>,
    /// The member's guild-specific nickname, if set.
    #[serde(default)]
    pub nick: Option<String>,
    /// Ids of the roles granted to the member.
    #[serde(default)]
    pub roles: Vec<RoleId>,
}
