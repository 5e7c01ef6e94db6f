use std::{
    fmt,
    fmt::Display,
    str::FromStr,
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

static NON_ID_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9]").expect("identifier pattern should compile")
});

/// A normalized identifier for a resource.
///
/// Identifiers are lowercase and alphanumeric, so `"Clear Body"`, `"clear-body"`, and
/// `"clearbody"` all refer to the same ability. Identifiers are the symbols that capability
/// registries are keyed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(String);

impl Id {
    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn normalize(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        Self(NON_ID_CHARACTERS.replace_all(&lower, "").into_owned())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

impl From<&String> for Id {
    fn from(value: &String) -> Self {
        Self::normalize(value)
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

/// A resource that has a stable identifier.
pub trait Identifiable {
    fn id(&self) -> Id;
}
