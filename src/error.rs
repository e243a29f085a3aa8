use std::error::Error as StdError;
use std::fmt;
use std::result::Result as StdResult;

use crate::cache::DirectoryError;
use crate::model::channel::ChannelType;
use crate::model::id::ChannelId;

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, expose only one
/// type, rather than the usual two (`Result<T, Error>`). This is because all
/// functions that return a result return the library's [`Error`], so this is
/// implied, and a "simpler" result is used.
pub type Result<T> = StdResult<T, Error>;

/// A common error enum returned by most of the library's functionality.
///
/// Materialization fails fast: whenever one of these is returned, no
/// partially-built [`Interaction`] has escaped. None of the variants are
/// retried internally; the caller decides whether to re-request fresh state
/// and retry.
///
/// [`Interaction`]: crate::model::application::Interaction
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A guild-scoped payload referenced a channel that is neither cached nor
    /// a thread that can be fabricated from the payload.
    ///
    /// Fatal and non-retryable: the local cache is stale relative to a
    /// channel the platform claims exists, which re-running the same
    /// resolution cannot repair.
    ChannelResolution {
        /// Id of the channel that could not be resolved.
        channel_id: ChannelId,
        /// Channel type the payload declared.
        kind: ChannelType,
    },
    /// A direct-message payload declared a channel type other than
    /// [`ChannelType::Private`].
    UnsupportedChannelType(ChannelType),
    /// An error propagated unchanged from the entity directory.
    Directory(DirectoryError),
    /// The payload carried no `context` field while the configured
    /// [`ContextPolicy`] requires one.
    ///
    /// [`ContextPolicy`]: crate::materializer::ContextPolicy
    MissingContext,
    /// A sub-object required for the payload's scope was absent, e.g. the
    /// `member` object of a guild-scoped interaction.
    MissingField(&'static str),
    /// A message search parameter was outside its accepted range.
    InvalidSearchRequest(&'static str),
}

impl From<DirectoryError> for Error {
    fn from(err: DirectoryError) -> Error {
        Error::Directory(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ChannelResolution {
                channel_id,
                kind,
            } => {
                write!(f, "failed to resolve channel {channel_id} of type {kind:?}")
            },
            Error::UnsupportedChannelType(kind) => {
                write!(f, "received interaction in unsupported channel type {kind:?}")
            },
            Error::Directory(inner) => fmt::Display::fmt(inner, f),
            Error::MissingContext => f.write_str("no context provided in interaction"),
            Error::MissingField(name) => {
                write!(f, "interaction payload is missing the `{name}` object")
            },
            Error::InvalidSearchRequest(msg) => f.write_str(msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Directory(inner) => Some(inner),
            _ => None,
        }
    }
}
