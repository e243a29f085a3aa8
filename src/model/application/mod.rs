//! Models about the application attached to interactions and the contexts
//! interactions can be invoked from.

mod interaction;

use std::fmt;

use serde::de::{Deserializer, Error as DeError, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub use self::interaction::*;
use super::id::{GuildId, UserId};
use crate::internal::prelude::*;

/// The location an interaction was invoked from, as reported by the platform.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum InteractionContextType {
    /// Invoked within a guild.
    Guild,
    /// Invoked within the DM between the user and the application's bot.
    BotDm,
    /// Invoked within a DM or group DM the bot is not part of.
    PrivateChannel,
    /// Context type is unknown.
    Unknown,
}

impl InteractionContextType {
    /// Looks up a context type by its wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "0" => Self::Guild,
            "1" => Self::BotDm,
            "2" => Self::PrivateChannel,
            _ => Self::Unknown,
        }
    }
}

enum_number! {
    /// Where an application can be installed.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InstallationContext {
        /// Installed to a guild, available to all its members.
        Guild = 0,
        /// Installed to a user, available everywhere they go.
        User = 1,
        _ => Unknown(u8),
    }
}

/// An installation context and the entity the application was installed to
/// within it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum AuthorizingIntegrationOwner {
    /// The application was installed to a guild. Contains the guild's Id, or
    /// `None` when the interaction is sent from guild context but the
    /// application was authorized by a user.
    GuildInstall(Option<GuildId>),
    /// The application was installed to a user. Contains that user's Id.
    UserInstall(UserId),
    /// The installation context is unknown.
    Unknown(InstallationContext),
}

/// The set of installation contexts an interaction's application was
/// authorized through.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthorizingIntegrationOwners(pub Vec<AuthorizingIntegrationOwner>);

impl<'de> Deserialize<'de> for AuthorizingIntegrationOwners {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        struct AuthorizingIntegrationOwnersVisitor;

        impl<'de> Visitor<'de> for AuthorizingIntegrationOwnersVisitor {
            type Value = AuthorizingIntegrationOwners;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of installation contexts to owner ids")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> StdResult<Self::Value, A::Error> {
                let mut out = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    // The platform keys this map by the stringified
                    // `InstallationContext` value.
                    let Ok(context) = key.parse::<u8>() else {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    };

                    let owner = match InstallationContext::from(context) {
                        InstallationContext::Guild => {
                            let id = snowflake_from_value(&map.next_value::<Value>()?)?;
                            // A zero guild id means a user-authorized
                            // application acting in guild context.
                            AuthorizingIntegrationOwner::GuildInstall(
                                (id != 0).then(|| GuildId::new(id)),
                            )
                        },
                        InstallationContext::User => {
                            let id = snowflake_from_value(&map.next_value::<Value>()?)?;
                            AuthorizingIntegrationOwner::UserInstall(UserId::new(id))
                        },
                        unknown => {
                            map.next_value::<IgnoredAny>()?;
                            AuthorizingIntegrationOwner::Unknown(unknown)
                        },
                    };
                    out.push(owner);
                }

                Ok(AuthorizingIntegrationOwners(out))
            }
        }

        deserializer.deserialize_map(AuthorizingIntegrationOwnersVisitor)
    }
}

impl Serialize for AuthorizingIntegrationOwners {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for owner in &self.0 {
            match owner {
                AuthorizingIntegrationOwner::GuildInstall(id) => {
                    let id = id.map_or(0, GuildId::get);
                    map.serialize_entry(&u8::from(InstallationContext::Guild), &id.to_string())?;
                },
                AuthorizingIntegrationOwner::UserInstall(id) => {
                    map.serialize_entry(&u8::from(InstallationContext::User), &id.to_string())?;
                },
                AuthorizingIntegrationOwner::Unknown(context) => {
                    map.serialize_entry(&u8::from(*context), "0")?;
                },
            }
        }
        map.end()
    }
}

// Snowflakes arrive as either strings or bare integers depending on the
// endpoint.
fn snowflake_from_value<E: DeError>(value: &Value) -> StdResult<u64, E> {
    match value {
        Value::String(s) => s.parse().map_err(E::custom),
        Value::Number(n) => n.as_u64().ok_or_else(|| E::custom("snowflake out of range")),
        _ => Err(E::custom("expected a string or integer snowflake")),
    }
}
