//! A set of permissions attached to an interaction for the invoking user or
//! for the application itself within the channel.

use bitflags::bitflags;
use serde::de::Deserializer;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

use super::utils::U64Visitor;
use crate::internal::prelude::*;

bitflags! {
    /// A set of permissions within a channel.
    ///
    /// Unknown bits are dropped on decode rather than rejected, as the
    /// platform adds permissions over time.
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct Permissions: u64 {
        /// Allows creating invites.
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Allows kicking members.
        const KICK_MEMBERS = 1 << 1;
        /// Allows banning members.
        const BAN_MEMBERS = 1 << 2;
        /// Allows all permissions and bypasses channel permission overwrites.
        const ADMINISTRATOR = 1 << 3;
        /// Allows management and editing of channels.
        const MANAGE_CHANNELS = 1 << 4;
        /// Allows management and editing of the guild.
        const MANAGE_GUILD = 1 << 5;
        /// Allows adding reactions to messages.
        const ADD_REACTIONS = 1 << 6;
        /// Allows viewing a channel.
        const VIEW_CHANNEL = 1 << 10;
        /// Allows sending messages in a channel.
        const SEND_MESSAGES = 1 << 11;
        /// Allows deleting messages of other members.
        const MANAGE_MESSAGES = 1 << 13;
        /// Allows embedding links in messages.
        const EMBED_LINKS = 1 << 14;
        /// Allows uploading files.
        const ATTACH_FILES = 1 << 15;
        /// Allows reading the message history of a channel.
        const READ_MESSAGE_HISTORY = 1 << 16;
        /// Allows mentioning `@everyone`, `@here` and all roles.
        const MENTION_EVERYONE = 1 << 17;
        /// Allows using external emojis.
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        /// Allows management and editing of roles.
        const MANAGE_ROLES = 1 << 28;
        /// Allows management and editing of webhooks.
        const MANAGE_WEBHOOKS = 1 << 29;
        /// Allows using application commands.
        const USE_APPLICATION_COMMANDS = 1 << 31;
        /// Allows creating public threads.
        const CREATE_PUBLIC_THREADS = 1 << 35;
        /// Allows creating private threads.
        const CREATE_PRIVATE_THREADS = 1 << 36;
        /// Allows sending messages in threads.
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
    }
}

// Permission bitsets are serialized as strings on the wire, since they exceed
// what some JSON implementations can represent as a number.
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let bits = deserializer.deserialize_any(U64Visitor)?;

        Ok(Permissions::from_bits_truncate(bits))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_bitset() {
        let perms: Permissions = serde_json::from_value(serde_json::json!("2048")).unwrap();

        assert_eq!(perms, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let perms: Permissions = serde_json::from_value(serde_json::json!(u64::MAX.to_string())).unwrap();

        assert!(perms.contains(Permissions::ADMINISTRATOR));
    }
}
