//! A collection of newtypes defining type-strong IDs.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

use super::utils::U64Visitor;
use crate::internal::prelude::*;

/// Number of seconds between the Unix epoch and the Discord epoch.
const DISCORD_EPOCH_OFFSET: u64 = 1_420_070_400;

macro_rules! id {
    ($(#[$attr:meta] $name:ident;)*) => {
        $(
            #[$attr]
            #[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
            pub struct $name(pub u64);

            impl $name {
                /// Creates a new Id from a `u64`.
                #[must_use]
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                /// Retrieves the inner `u64` of the Id.
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }

                /// Retrieves the Unix timestamp, in seconds, that the Id was
                /// created at.
                #[must_use]
                pub const fn created_at(self) -> u64 {
                    (self.0 >> 22) / 1000 + DISCORD_EPOCH_OFFSET
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> $name {
                    $name(id)
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.0
                }
            }

            impl PartialEq<u64> for $name {
                fn eq(&self, u: &u64) -> bool {
                    self.0 == *u
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            // Snowflakes arrive as strings on the wire, but fixtures and
            // older payloads use bare integers; accept both.
            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
                    deserializer.deserialize_any(U64Visitor).map($name)
                }
            }

            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }
        )*
    }
}

id! {
    /// An identifier for an Application.
    ApplicationId;
    /// An identifier for a Channel.
    ChannelId;
    /// An identifier for an Entitlement.
    EntitlementId;
    /// An identifier for a Guild.
    GuildId;
    /// An identifier for an Interaction.
    InteractionId;
    /// An identifier for a Message.
    MessageId;
    /// An identifier for a Role.
    RoleId;
    /// An identifier for a SKU.
    SkuId;
    /// An identifier for a User.
    UserId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_creation_time() {
        // 2016-11-26T18:16:22Z
        assert_eq!(ChannelId(252295540085817344).created_at(), 1480184182);
    }

    #[test]
    fn accepts_string_and_integer_forms() {
        let from_str: UserId = serde_json::from_value(serde_json::json!("81384788765712384")).unwrap();
        let from_int: UserId = serde_json::from_value(serde_json::json!(81384788765712384u64)).unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(from_str, 81384788765712384u64);
    }
}
