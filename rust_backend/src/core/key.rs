//! Hashable, totally ordered identifiers used as matrix axes and group labels.
//!
//! Table cells arrive as loosely typed JSON values. Columns such as `id_1`,
//! `route` or a categorical `car` can carry integers, floats or strings, and
//! every grouping operation needs them to be `Eq + Ord + Hash`. [`Key`] is that
//! common representation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

/// An identifier or categorical label taken from a table cell.
///
/// Floats without a fractional part that fit in an `i64` are normalized to
/// [`Key::Int`], so `1` and `1.0` name the same id. Numbers sort before text;
/// numbers compare numerically and text lexicographically.
///
/// Build numeric keys through [`Key::from_f64`] or `From<f64>`; a hand-made
/// `Key::Float(1.0)` is not equal to `Key::Int(1)`.
///
/// # Examples
///
/// ```
/// use transit_tables::core::Key;
///
/// assert_eq!(Key::from(3.0), Key::Int(3));
/// assert!(Key::Int(10) < Key::from("A"));
/// assert!(Key::from(2.5) < Key::Int(3));
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Key {
    /// Builds a key from a float, collapsing integral values to [`Key::Int`].
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            Key::Int(value as i64)
        } else {
            Key::Float(value)
        }
    }

    /// Numeric view of the key, `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Key::Int(v) => Some(*v as f64),
            Key::Float(v) => Some(*v),
            Key::Text(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Key::Int(_) | Key::Float(_) => 0,
            Key::Text(_) => 1,
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Float(a), Key::Float(b)) => a.total_cmp(b),
            (Key::Text(a), Key::Text(b)) => a.cmp(b),
            (Key::Int(a), Key::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Key::Float(a), Key::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

// Equal keys always share a variant (see `cmp`), so hashing per variant is consistent.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Int(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Key::Float(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Key::Text(v) => {
                2u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Float(v) => write!(f, "{}", v),
            Key::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::from_f64(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(v) => serializer.serialize_i64(*v),
            Key::Float(v) => serializer.serialize_f64(*v),
            Key::Text(v) => serializer.serialize_str(v),
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer, float or string identifier")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| E::custom(format!("identifier {} does not fit in i64", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Key, E> {
        Ok(Key::from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
        Ok(Key::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
        Ok(Key::Text(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}
