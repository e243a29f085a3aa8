//! Models for the message search endpoint's response body.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

use super::channel::Message;
use crate::internal::prelude::*;

/// The body returned by the message search endpoint.
///
/// A guild that has not been searched recently may still be indexing, in
/// which case the endpoint returns a retry hint instead of results. The two
/// shapes share no discriminator field, so this is detected structurally.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum MessageSearchResponse {
    /// The search index for the guild is still being built.
    Indexing(SearchIndexing),
    /// The search completed and returned matching messages.
    Results(SearchResults),
}

impl MessageSearchResponse {
    /// Whether the guild's index was not yet ready.
    #[must_use]
    pub fn is_indexing(&self) -> bool {
        matches!(self, Self::Indexing(_))
    }

    /// Converts this to a [`SearchResults`] reference, if the search
    /// completed.
    #[must_use]
    pub fn as_results(&self) -> Option<&SearchResults> {
        match self {
            Self::Results(results) => Some(results),
            Self::Indexing(_) => None,
        }
    }

    /// Converts this to a [`SearchIndexing`] reference, if the index was not
    /// yet ready.
    #[must_use]
    pub fn as_indexing(&self) -> Option<&SearchIndexing> {
        match self {
            Self::Indexing(indexing) => Some(indexing),
            Self::Results(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for MessageSearchResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let map = JsonMap::deserialize(deserializer)?;

        // Only the "still indexing" shape carries a retry hint.
        if map.contains_key("retry_after") {
            serde_json::from_value(Value::Object(map))
                .map(Self::Indexing)
                .map_err(DeError::custom)
        } else {
            serde_json::from_value(Value::Object(map))
                .map(Self::Results)
                .map_err(DeError::custom)
        }
    }
}

/// A hint that the guild's search index is still being built.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct SearchIndexing {
    /// How many documents have been indexed so far.
    #[serde(default)]
    pub documents_indexed: u32,
    /// How many seconds to wait before retrying the search.
    pub retry_after: u32,
}

/// The result set of a completed message search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct SearchResults {
    /// An opaque Id identifying this search for analytics purposes.
    #[serde(default)]
    pub analytics_id: String,
    /// The matched messages, in the requested sort order.
    ///
    /// The endpoint groups each hit with its surrounding context; the groups
    /// are flattened here, hits and context messages alike.
    #[serde(deserialize_with = "deserialize_message_groups")]
    pub messages: Vec<Message>,
    /// Whether older history is still being added to the index.
    #[serde(rename = "doing_deep_historical_index", default)]
    pub deep_historical_index: bool,
    /// The total number of matches, which may exceed the page size.
    #[serde(default)]
    pub total_results: u32,
}

// Each element of the wire-level `messages` array is itself an array of
// messages: the hit plus context messages around it. All of them are kept.
fn deserialize_message_groups<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> StdResult<Vec<Message>, D::Error> {
    let groups = Vec::<Vec<Message>>::deserialize(deserializer)?;

    Ok(groups.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_indexing_response() {
        let response: MessageSearchResponse = serde_json::from_value(serde_json::json!({
            "documents_indexed": 1704,
            "retry_after": 18,
        }))
        .unwrap();

        assert!(response.is_indexing());
        assert_eq!(response.as_indexing().unwrap().retry_after, 18);
    }

    #[test]
    fn flattens_message_groups() {
        let response: MessageSearchResponse = serde_json::from_value(serde_json::json!({
            "analytics_id": "abc",
            "total_results": 2,
            "messages": [
                [
                    {"id": "10", "channel_id": "1", "author": {"id": "7", "username": "a"}, "content": "hit one"},
                    {"id": "11", "channel_id": "1", "author": {"id": "8", "username": "b"}, "content": "context"},
                ],
                [
                    {"id": "20", "channel_id": "2", "author": {"id": "7", "username": "a"}, "content": "hit two"},
                ],
            ],
        }))
        .unwrap();

        let results = response.as_results().unwrap();
        assert_eq!(results.total_results, 2);
        assert_eq!(results.messages.len(), 3);
        assert_eq!(results.messages[0].content, "hit one");
        assert_eq!(results.messages[1].content, "context");
        assert_eq!(results.messages[2].content, "hit two");
    }

    #[test]
    fn context_messages_are_retained() {
        let response: MessageSearchResponse = serde_json::from_value(serde_json::json!({
            "total_results": 1,
            "messages": [
                [
                    {"id": "10", "channel_id": "1", "author": {"id": "7", "username": "a"}, "content": "hit"},
                    {"id": "11", "channel_id": "1", "author": {"id": "8", "username": "b"}, "content": "before"},
                ],
            ],
        }))
        .unwrap();

        assert_eq!(response.as_results().unwrap().messages.len(), 2);
    }
}
