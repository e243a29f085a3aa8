use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::internal::prelude::*;
use crate::model::id::{ChannelId, GuildId, MessageId, UserId};

/// The kind of author to restrict a search to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum AuthorType {
    User,
    Bot,
    Webhook,
}

impl AuthorType {
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Webhook => "webhook",
        }
    }
}

/// A kind of content a matched message must carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum HasType {
    Image,
    Sound,
    Video,
    File,
    Sticker,
    Embed,
    Link,
    Poll,
    Snapshot,
}

impl HasType {
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Sound => "sound",
            Self::Video => "video",
            Self::File => "file",
            Self::Sticker => "sticker",
            Self::Embed => "embed",
            Self::Link => "link",
            Self::Poll => "poll",
            Self::Snapshot => "snapshot",
        }
    }
}

/// The kind of embed a matched message must carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EmbedType {
    Image,
    Video,
    Sound,
    Article,
}

impl EmbedType {
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Sound => "sound",
            Self::Article => "article",
        }
    }
}

/// The field results are sorted by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SortType {
    Timestamp,
    Relevance,
}

impl SortType {
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Relevance => "relevance",
        }
    }
}

/// The direction results are sorted in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A builder for the message search endpoint's query parameters.
///
/// Every filter is optional; an empty builder searches the whole guild.
/// Validation happens when the query is marshalled, not when setters are
/// called, so setters stay chainable and infallible.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct SearchMessages {
    guild_id: GuildId,
    limit: Option<u8>,
    offset: Option<u16>,
    min_id: Option<MessageId>,
    max_id: Option<MessageId>,
    slop: Option<u8>,
    content: Option<String>,
    channel_ids: Vec<ChannelId>,
    author_types: Vec<AuthorType>,
    author_ids: Vec<UserId>,
    mentions: Vec<UserId>,
    mention_everyone: Option<bool>,
    pinned: Option<bool>,
    has: Vec<HasType>,
    embed_types: Vec<EmbedType>,
    embed_providers: Vec<String>,
    link_hostnames: Vec<String>,
    attachment_filenames: Vec<String>,
    attachment_extensions: Vec<String>,
    sort_by: Option<SortType>,
    sort_order: Option<SortOrder>,
    include_nsfw: Option<bool>,
}

impl SearchMessages {
    /// Creates a builder searching the given guild.
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            ..Default::default()
        }
    }

    /// The guild the search is scoped to.
    #[must_use]
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// How many results to return per page, between 1 and 25.
    pub fn limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }

    /// How many results to skip, between 1 and 9975.
    pub fn offset(mut self, offset: u16) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only match messages sent after the given one.
    pub fn min_id(mut self, min_id: MessageId) -> Self {
        self.min_id = Some(min_id);
        self
    }

    /// Only match messages sent before the given one.
    pub fn max_id(mut self, max_id: MessageId) -> Self {
        self.max_id = Some(max_id);
        self
    }

    /// How many words may separate the words of the query, between 0 and 100.
    pub fn slop(mut self, slop: u8) -> Self {
        self.slop = Some(slop);
        self
    }

    /// The text to search for, at most 1024 characters.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Restrict the search to the given channel.
    pub fn channel(mut self, channel_id: ChannelId) -> Self {
        self.channel_ids.push(channel_id);
        self
    }

    /// Only match messages by the given kind of author.
    pub fn author_type(mut self, author_type: AuthorType) -> Self {
        self.author_types.push(author_type);
        self
    }

    /// Only match messages by the given user.
    pub fn author(mut self, author_id: UserId) -> Self {
        self.author_ids.push(author_id);
        self
    }

    /// Only match messages mentioning the given user.
    pub fn mentions(mut self, user_id: UserId) -> Self {
        self.mentions.push(user_id);
        self
    }

    /// Only match messages that do or do not mention `@everyone`.
    pub fn mention_everyone(mut self, mention_everyone: bool) -> Self {
        self.mention_everyone = Some(mention_everyone);
        self
    }

    /// Only match messages that are or are not pinned.
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    /// Only match messages carrying the given kind of content.
    pub fn has(mut self, has: HasType) -> Self {
        self.has.push(has);
        self
    }

    /// Only match messages carrying the given kind of embed.
    pub fn embed_type(mut self, embed_type: EmbedType) -> Self {
        self.embed_types.push(embed_type);
        self
    }

    /// Only match messages with an embed from the given provider.
    pub fn embed_provider(mut self, provider: impl Into<String>) -> Self {
        self.embed_providers.push(provider.into());
        self
    }

    /// Only match messages linking to the given hostname.
    pub fn link_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.link_hostnames.push(hostname.into());
        self
    }

    /// Only match messages with an attachment of the given filename.
    pub fn attachment_filename(mut self, filename: impl Into<String>) -> Self {
        self.attachment_filenames.push(filename.into());
        self
    }

    /// Only match messages with an attachment of the given extension.
    pub fn attachment_extension(mut self, extension: impl Into<String>) -> Self {
        self.attachment_extensions.push(extension.into());
        self
    }

    /// Sort results by the given field.
    pub fn sort_by(mut self, sort_by: SortType) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Sort results in the given direction.
    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Whether to include results from channels marked NSFW.
    pub fn include_nsfw(mut self, include_nsfw: bool) -> Self {
        self.include_nsfw = Some(include_nsfw);
        self
    }

    /// Validates the builder and marshals it into key/value pairs in wire
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSearchRequest`] when a parameter is outside
    /// its accepted range.
    pub fn query_params(&self) -> Result<Vec<(&'static str, String)>> {
        if let Some(limit) = self.limit {
            if !(1..=25).contains(&limit) {
                return Err(Error::InvalidSearchRequest("limit must be between 1 and 25"));
            }
        }
        if let Some(offset) = self.offset {
            if !(1..=9975).contains(&offset) {
                return Err(Error::InvalidSearchRequest("offset must be between 1 and 9975"));
            }
        }
        if let Some(slop) = self.slop {
            if slop > 100 {
                return Err(Error::InvalidSearchRequest("slop must be between 0 and 100"));
            }
        }
        if let Some(content) = &self.content {
            if content.chars().count() > 1024 {
                return Err(Error::InvalidSearchRequest(
                    "content must be at most 1024 characters",
                ));
            }
        }

        let mut params = Vec::new();

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(min_id) = self.min_id {
            params.push(("min_id", min_id.to_string()));
        }
        if let Some(max_id) = self.max_id {
            params.push(("max_id", max_id.to_string()));
        }
        if let Some(slop) = self.slop {
            params.push(("slop", slop.to_string()));
        }
        if let Some(content) = &self.content {
            params.push(("content", content.clone()));
        }
        if !self.channel_ids.is_empty() {
            params.push(("channel_id", join(&self.channel_ids, |id| id.to_string())));
        }
        if !self.author_types.is_empty() {
            params.push(("author_type", join(&self.author_types, |t| t.value().to_string())));
        }
        if !self.author_ids.is_empty() {
            params.push(("author_id", join(&self.author_ids, |id| id.to_string())));
        }
        if !self.mentions.is_empty() {
            params.push(("mentions", join(&self.mentions, |id| id.to_string())));
        }
        if let Some(mention_everyone) = self.mention_everyone {
            params.push(("mention_everyone", mention_everyone.to_string()));
        }
        if let Some(pinned) = self.pinned {
            params.push(("pinned", pinned.to_string()));
        }
        if !self.has.is_empty() {
            params.push(("has", join(&self.has, |h| h.value().to_string())));
        }
        if !self.embed_types.is_empty() {
            params.push(("embed_type", join(&self.embed_types, |t| t.value().to_string())));
        }
        if !self.embed_providers.is_empty() {
            params.push(("embed_provider", self.embed_providers.join(",")));
        }
        if !self.link_hostnames.is_empty() {
            params.push(("link_hostname", self.link_hostnames.join(",")));
        }
        if !self.attachment_filenames.is_empty() {
            params.push(("attachment_filename", self.attachment_filenames.join(",")));
        }
        if !self.attachment_extensions.is_empty() {
            params.push(("attachment_extension", self.attachment_extensions.join(",")));
        }
        if let Some(sort_by) = self.sort_by {
            params.push(("sort_by", sort_by.value().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            params.push(("sort_order", sort_order.value().to_string()));
        }
        if let Some(include_nsfw) = self.include_nsfw {
            params.push(("include_nsfw", include_nsfw.to_string()));
        }

        Ok(params)
    }

    /// Validates the builder and marshals it into a percent-encoded query
    /// string, including the leading `?` when any parameter is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSearchRequest`] when a parameter is outside
    /// its accepted range.
    pub fn query_string(&self) -> Result<String> {
        let params = self.query_params()?;

        let mut out = String::new();
        for (i, (key, value)) in params.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(key);
            out.push('=');
            out.extend(utf8_percent_encode(value, NON_ALPHANUMERIC));
        }

        Ok(out)
    }
}

fn join<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(",")
}
