use tracing::debug;

use crate::cache::EntityDirectory;
use crate::internal::prelude::*;
use crate::model::channel::{ChannelType, GuildChannel, PartialChannel, PrivateChannel};
use crate::model::id::GuildId;
use crate::model::user::User;

// Threads are the one guild channel kind that may legitimately be absent
// from the directory, since they are created and archived constantly. Any
// other miss is a directory consistency problem and fails resolution.
pub(super) fn resolve_guild(
    directory: &dyn EntityDirectory,
    guild_id: GuildId,
    channel: &PartialChannel,
) -> Result<GuildChannel> {
    if let Some(found) = directory.guild_channel(guild_id, channel.id) {
        return Ok(found);
    }

    if channel.kind.is_thread() {
        debug!(channel_id = channel.id.get(), "registering uncached thread");

        return Ok(directory.create_thread_channel(guild_id, channel)?);
    }

    Err(Error::ChannelResolution {
        channel_id: channel.id,
        kind: channel.kind,
    })
}

pub(super) fn resolve_private(
    directory: &dyn EntityDirectory,
    channel: &PartialChannel,
    recipient: &User,
) -> Result<PrivateChannel> {
    if channel.kind != ChannelType::Private {
        return Err(Error::UnsupportedChannelType(channel.kind));
    }

    if let Some(found) = directory.private_channel(channel.id) {
        return Ok(found);
    }

    debug!(channel_id = channel.id.get(), "registering uncached private channel");

    Ok(directory.create_private_channel(channel.id, recipient)?)
}
