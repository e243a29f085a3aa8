//! Models for premium offerings granted to users and guilds.

use serde::{Deserialize, Serialize};

use super::id::{ApplicationId, EntitlementId, GuildId, SkuId, UserId};

/// Represents that a user or guild has access to a premium offering in the
/// application.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Entitlement {
    /// The ID of the entitlement.
    pub id: EntitlementId,
    /// The ID of the corresponding SKU.
    pub sku_id: SkuId,
    /// The ID of the parent application.
    pub application_id: ApplicationId,
    /// The ID of the user that is granted access to the SKU.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// The ID of the guild that is granted access to the SKU.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// The type of the entitlement.
    #[serde(rename = "type")]
    pub kind: EntitlementKind,
    /// Whether the entitlement has been deleted or not. Entitlements are not
    /// deleted when they expire.
    #[serde(default)]
    pub deleted: bool,
}

impl Entitlement {
    /// The entity the entitlement was granted to.
    #[must_use]
    pub fn owner(&self) -> Option<EntitlementOwner> {
        if let Some(guild_id) = self.guild_id {
            Some(EntitlementOwner::Guild(guild_id))
        } else {
            self.user_id.map(EntitlementOwner::User)
        }
    }
}

enum_number! {
    /// Differentiates between entitlement types.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum EntitlementKind {
        /// Entitlement was purchased by a user.
        Purchase = 1,
        /// Entitlement for a nitro subscription.
        PremiumSubscription = 2,
        /// Entitlement was gifted by the developer.
        DeveloperGift = 3,
        /// Entitlement was purchased by a developer in application test mode.
        TestModePurchase = 4,
        /// Entitlement was granted when the SKU was free.
        FreePurchase = 5,
        /// Entitlement was gifted by another user.
        UserGift = 6,
        /// Entitlement was claimed for free by a nitro subscriber.
        PremiumPurchase = 7,
        /// Entitlement was purchased as an app subscription.
        ApplicationSubscription = 8,
        _ => Unknown(u8),
    }
}

/// The entity an [`Entitlement`] grants access to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntitlementOwner {
    /// Every member of the guild has access.
    Guild(GuildId),
    /// Only the purchasing user has access.
    User(UserId),
}
