use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::platform::ALL;

/// How a list of identifiers selects devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceKind {
    /// Devices carrying any of the tags.
    Tag,
    /// Devices carrying all of the tags.
    TagAnd,
    Alias,
    RegistrationId,
}

impl AudienceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceKind::Tag => "tag",
            AudienceKind::TagAnd => "tag_and",
            AudienceKind::Alias => "alias",
            AudienceKind::RegistrationId => "registration_id",
        }
    }
}

/// The devices a push targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    All,
    Selectors(BTreeMap<AudienceKind, Vec<String>>),
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Selectors(BTreeMap::new())
    }
}

impl Audience {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tag<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(AudienceKind::Tag, tags);
    }

    pub fn set_tag_and<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(AudienceKind::TagAnd, tags);
    }

    pub fn set_alias<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(AudienceKind::Alias, aliases);
    }

    pub fn set_registration_id<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(AudienceKind::RegistrationId, ids);
    }

    /// Replaces the identifiers for one selector kind. Has no effect once the
    /// audience targets every device.
    pub fn set<I, S>(&mut self, kind: AudienceKind, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Audience::Selectors(selectors) = self {
            selectors.insert(kind, values.into_iter().map(Into::into).collect());
        }
    }

    pub fn set_all(&mut self) {
        *self = Audience::All;
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Audience::All)
    }

    pub fn get(&self, kind: AudienceKind) -> Option<&[String]> {
        match self {
            Audience::All => None,
            Audience::Selectors(selectors) => selectors.get(&kind).map(Vec::as_slice),
        }
    }

    /// The JSON form sent in the `audience` field.
    pub fn to_value(&self) -> Value {
        match self {
            Audience::All => Value::from(ALL),
            Audience::Selectors(selectors) => Value::Object(
                selectors
                    .iter()
                    .map(|(kind, values)| (kind.as_str().to_string(), Value::from(values.clone())))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Audience {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Audience::All => serializer.serialize_str(ALL),
            Audience::Selectors(selectors) => selectors.serialize(serializer),
        }
    }
}
