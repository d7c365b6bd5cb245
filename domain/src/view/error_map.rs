//! Server error map
//!
//! The board reports failures as `{"errors": {category: [messages...]}}`,
//! e.g. `{"permission denied": ["You cannot vote for your own post"]}`.
//! Categories are free-form labels; the client only renders them.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered mapping from error category to its messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with a single category and message
    pub fn single(category: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.push(category, message);
        map
    }

    /// Append a message, creating the category if needed
    pub fn push(&mut self, category: impl Into<String>, message: impl Into<String>) {
        let category = category.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((category, vec![message])),
        }
    }

    pub fn messages(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(category, messages)| (category.as_str(), messages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(category, messages)| format!("{}: {}", category, messages.join("; ")))
            .collect();
        f.write_str(&rendered.join(", "))
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, messages) in &self.entries {
            map.serialize_entry(category, messages)?;
        }
        map.end()
    }
}

/// Servers sometimes send a bare string instead of a one-element list
#[derive(Deserialize)]
#[serde(untagged)]
enum Messages {
    One(String),
    Many(Vec<String>),
}

struct ErrorMapVisitor;

impl<'de> Visitor<'de> for ErrorMapVisitor {
    type Value = ErrorMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of error categories to messages")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ErrorMap::new();
        while let Some((category, messages)) = access.next_entry::<String, Messages>()? {
            match messages {
                Messages::One(message) => map.push(category, message),
                Messages::Many(messages) => {
                    for message in messages {
                        map.push(category.clone(), message);
                    }
                }
            }
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ErrorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ErrorMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_server_order() {
        let map: ErrorMap = serde_json::from_str(
            r#"{"subject": ["This field is required."], "content": ["This field is required.", "Too short"]}"#,
        )
        .unwrap();
        let categories: Vec<_> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, vec!["subject", "content"]);
        assert_eq!(map.messages("content").unwrap().len(), 2);
    }

    #[test]
    fn test_deserialize_bare_string_message() {
        let map: ErrorMap = serde_json::from_str(r#"{"permission denied": "nope"}"#).unwrap();
        assert_eq!(map.messages("permission denied").unwrap(), ["nope".to_string()]);
    }

    #[test]
    fn test_push_groups_by_category() {
        let mut map = ErrorMap::single("network", "timeout");
        map.push("network", "retry later");
        map.push("auth", "expired");
        assert_eq!(map.len(), 2);
        assert_eq!(map.to_string(), "network: timeout; retry later, auth: expired");
    }

    #[test]
    fn test_serialize_as_json_object() {
        let map = ErrorMap::single("permission denied", "nope");
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"permission denied":["nope"]}"#
        );
    }
}
