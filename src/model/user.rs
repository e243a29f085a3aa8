//! User information-related models.

use serde::{Deserialize, Serialize};

use super::id::{ChannelId, UserId};
use super::utils::deserialize_u16;
use crate::internal::prelude::*;

/// Information about a user, such as the invoker of an interaction or the
/// recipient of a private channel.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's
    /// creation date.
    pub id: UserId,
    /// The account's username. Changing the username will trigger a
    /// discriminator change if the pair is taken.
    #[serde(default, rename = "username")]
    pub name: String,
    /// The account's discriminator. `0` for accounts migrated to unique
    /// usernames.
    #[serde(default, deserialize_with = "deserialize_discriminator")]
    pub discriminator: u16,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// The private channel the library has open with this user, if one has
    /// been resolved. Maintained by the entity directory, never sent on the
    /// wire.
    #[serde(skip)]
    pub private_channel_id: Option<ChannelId>,
}

impl User {
    /// Returns the user's `name#discriminator` pair, or the plain name for
    /// accounts without a discriminator.
    #[must_use]
    pub fn tag(&self) -> String {
        if self.discriminator == 0 {
            self.name.clone()
        } else {
            format!("{}#{:04}", self.name, self.discriminator)
        }
    }
}

// Legacy payloads send the discriminator as a zero-padded string.
fn deserialize_discriminator<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> StdResult<u16, D::Error> {
    deserialize_u16(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_discriminator_string() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "username": "bob",
            "discriminator": "0042",
        }))
        .unwrap();

        assert_eq!(user.discriminator, 42);
        assert_eq!(user.tag(), "bob#0042");
    }

    #[test]
    fn tag_omits_zero_discriminator() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "username": "anna",
        }))
        .unwrap();

        assert_eq!(user.tag(), "anna");
        assert_eq!(user.private_channel_id, None);
    }
}
