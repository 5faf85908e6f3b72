//! Channel identity value objects
//!
//! `DataConnectionId` identifies one relayed data channel end to end.
//! `TopicName` names the internal topics payloads are exchanged over.
//! Both validate on construction, so holding one is proof the value is
//! well formed.

use crate::constants::{
    DATA_CONNECTION_ID_PREFIX, DATA_CONNECTION_UUID_LENGTH, TOPIC_NAME_MAX_LENGTH,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Identifier of a single data channel
///
/// Format: `dc-` followed by a hyphenated UUID, matching the identifiers
/// the WebRTC side hands out for data connections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataConnectionId(String);

impl DataConnectionId {
    /// Validate and wrap an identifier
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` when the prefix or the UUID portion
    /// is malformed.
    pub fn try_create(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let Some(uuid_part) = id.strip_prefix(DATA_CONNECTION_ID_PREFIX) else {
            return Err(Error::invalid_argument(format!(
                "data connection id `{id}` must start with `{DATA_CONNECTION_ID_PREFIX}`"
            )));
        };
        if uuid_part.len() != DATA_CONNECTION_UUID_LENGTH
            || uuid::Uuid::parse_str(uuid_part).is_err()
        {
            return Err(Error::invalid_argument(format!(
                "data connection id `{id}` does not carry a valid UUID"
            )));
        }
        Ok(Self(id))
    }

    /// Mint a fresh identifier
    pub fn generate() -> Self {
        Self(format!(
            "{DATA_CONNECTION_ID_PREFIX}{}",
            uuid::Uuid::new_v4()
        ))
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataConnectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DataConnectionId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_create(value)
    }
}

impl From<DataConnectionId> for String {
    fn from(id: DataConnectionId) -> Self {
        id.0
    }
}

/// Name of an internal payload topic
///
/// Topic names accept ASCII alphanumerics, `_` and `/`, must begin with a
/// letter or `_`, and never contain `-`. Names derived from connection
/// identifiers therefore swap every `-` for `_`.
///
/// ```
/// use dcg_domain::value_objects::{DataConnectionId, TopicName};
///
/// let id = DataConnectionId::try_create("dc-50a32bab-b3d9-4913-8e20-f79c90a6a211")?;
/// let topic = TopicName::for_data_connection(&id);
/// assert_eq!(topic.as_str(), "dc_50a32bab_b3d9_4913_8e20_f79c90a6a211");
/// # Ok::<(), dcg_domain::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicName(String);

impl TopicName {
    /// Validate and wrap a topic name
    ///
    /// # Errors
    /// Returns `Error::Topic` when the name is empty, too long, or contains
    /// a character outside the accepted set.
    pub fn try_create(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::topic("topic name must not be empty"));
        }
        if name.len() > TOPIC_NAME_MAX_LENGTH {
            return Err(Error::topic(format!(
                "topic name exceeds {TOPIC_NAME_MAX_LENGTH} characters"
            )));
        }
        let mut chars = name.chars();
        let first = chars.next().unwrap_or('_');
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(Error::topic(format!(
                "topic name `{name}` must start with a letter or `_`"
            )));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '/'))
        {
            return Err(Error::topic(format!(
                "topic name `{name}` contains invalid character `{bad}`"
            )));
        }
        Ok(Self(name))
    }

    /// Derive the topic name tied to a data connection
    ///
    /// Connection identifiers contain `-`, which topic names forbid, so the
    /// derived name replaces each `-` with `_`.
    pub fn for_data_connection(id: &DataConnectionId) -> Self {
        Self(id.as_str().replace('-', "_"))
    }

    /// Append a `/`-separated segment to the name
    ///
    /// # Errors
    /// Returns `Error::Topic` when the combined name fails validation.
    pub fn with_segment(&self, segment: &str) -> Result<Self> {
        Self::try_create(format!("{}/{segment}", self.0))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TopicName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_create(value)
    }
}

impl From<TopicName> for String {
    fn from(name: TopicName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_validate() {
        let id = DataConnectionId::generate();
        assert!(id.as_str().starts_with("dc-"));
        assert!(DataConnectionId::try_create(id.as_str()).is_ok());
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(DataConnectionId::try_create("dc-not-a-uuid").is_err());
        assert!(DataConnectionId::try_create("50a32bab-b3d9-4913-8e20-f79c90a6a211").is_err());
        assert!(DataConnectionId::try_create("").is_err());
    }

    #[test]
    fn topic_names_reject_hyphens() {
        assert!(TopicName::try_create("topic-with-hyphen").is_err());
        assert!(TopicName::try_create("topic_with_underscore").is_ok());
        assert!(TopicName::try_create("ns/inner_topic").is_ok());
    }

    #[test]
    fn topic_names_reject_bad_leading_chars() {
        assert!(TopicName::try_create("9starts_with_digit").is_err());
        assert!(TopicName::try_create("/leading_slash").is_err());
        assert!(TopicName::try_create("").is_err());
    }

    #[test]
    fn derived_topic_names_validate() {
        let id = DataConnectionId::generate();
        let topic = TopicName::for_data_connection(&id);
        assert!(!topic.as_str().contains('-'));
        assert!(TopicName::try_create(topic.as_str()).is_ok());
    }

    #[test]
    fn serde_round_trips_and_validates() {
        let id = DataConnectionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: DataConnectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        let bad: std::result::Result<DataConnectionId, _> =
            serde_json::from_str("\"not-an-id\"");
        assert!(bad.is_err());
    }
}
