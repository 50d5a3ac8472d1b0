//! Scalar keys addressing records of a dataset

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A record key: integer or text.
///
/// Mapping datasets are keyed by `Key`; a sequence dataset exposes its
/// indices as `Key::Integer` when viewed as a mapping. A textual key whose
/// canonical decimal form round-trips (e.g. `"42"`, but not `"042"`) is
/// normalized to `Key::Integer`, so integer-keyed and string-keyed sources
/// agree on addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Integer(i64),
    Text(String),
}

impl Key {
    /// Get the key as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Key::Integer(n) => Some(*n),
            Key::Text(_) => None,
        }
    }

    /// Get the key as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Integer(_) => None,
            Key::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        // Only canonical decimal forms become integer keys, so the
        // string/integer normalization round-trips.
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Key::Integer(n),
            _ => Key::Text(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Key::Integer(n),
            _ => Key::Text(s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Integer(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Integer(n as i64)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Integer(n as i64)
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer key")
            }

            fn visit_str<E>(self, s: &str) -> Result<Key, E>
            where
                E: de::Error,
            {
                Ok(Key::from(s))
            }

            fn visit_i64<E>(self, n: i64) -> Result<Key, E>
            where
                E: de::Error,
            {
                Ok(Key::Integer(n))
            }

            fn visit_u64<E>(self, n: u64) -> Result<Key, E>
            where
                E: de::Error,
            {
                match i64::try_from(n) {
                    Ok(n) => Ok(Key::Integer(n)),
                    Err(_) => Ok(Key::Text(n.to_string())),
                }
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
