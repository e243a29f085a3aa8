use crate::cache::EntityDirectory;
use crate::internal::prelude::*;
use crate::model::channel::PrivateChannel;
use crate::model::user::User;

// A private channel cached before its user was seen has no recipient yet.
// Linking goes through the directory so that concurrent payloads for the same
// channel converge on one recipient.
pub(super) fn resolve_private(
    directory: &dyn EntityDirectory,
    channel: PrivateChannel,
    recipient: &User,
) -> Result<(PrivateChannel, User)> {
    if let Some(user) = channel.recipient.clone() {
        return Ok((channel, user));
    }

    let (channel, user) = directory.link_private_recipient(channel.id, recipient)?;

    Ok((channel, user))
}
