//! Validated newtype wrappers for the non-empty sequence types of the domain
//! model: [`Group`] (a non-empty bundle of identifiers) and [`Vector`] (a
//! non-empty sequence of groups). Both reject empty input at construction via
//! `TryFrom`; once built, the inner sequence is immutable.
use std::fmt;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when constructing a [`Group`] or [`Vector`] from an empty
/// `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtypeError {
    /// A [`Group`] was constructed from an empty list of identifiers.
    EmptyGroup,
    /// A [`Vector`] was constructed from an empty list of groups.
    EmptyVector,
}

impl fmt::Display for NewtypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroup => write!(f, "a Group must hold at least one identifier"),
            Self::EmptyVector => write!(f, "a Vector must hold at least one Group"),
        }
    }
}

impl std::error::Error for NewtypeError {}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A non-empty, ordered bundle of identifiers treated as one level of a
/// [`Vector`] — a *conjoined region* of identifiers considered simultaneously
/// present.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group<V>(Vec<V>);

impl<V> TryFrom<Vec<V>> for Group<V> {
    type Error = NewtypeError;

    fn try_from(values: Vec<V>) -> Result<Self, Self::Error> {
        if values.is_empty() {
            Err(NewtypeError::EmptyGroup)
        } else {
            Ok(Self(values))
        }
    }
}

impl<V> Group<V> {
    /// Builds a single-identifier group.
    pub fn singleton(value: V) -> Self {
        Self(vec![value])
    }

    /// Consumes the group, returning its identifiers in order.
    pub fn into_inner(self) -> Vec<V> {
        self.0
    }

    /// Number of identifiers held by this group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A `Group` can never be empty; provided to satisfy
    /// `clippy::len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<V: Clone> Group<V> {
    /// Returns a new group with `value` appended after its current last
    /// identifier.
    pub fn appended(&self, value: V) -> Self {
        let mut values = self.0.clone();
        values.push(value);
        Self(values)
    }
}

impl<V> Deref for Group<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        &self.0
    }
}

impl<V: fmt::Display> fmt::Display for Group<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "serde")]
impl<V: Serialize> Serialize for Group<V> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

#[cfg(feature = "serde")]
impl<'de, V: Deserialize<'de>> Deserialize<'de> for Group<V> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let values = Vec::<V>::deserialize(d)?;
        Self::try_from(values).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Vector
// ---------------------------------------------------------------------------

/// A non-empty, ordered sequence of [`Group`]s: one lineage path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vector<V>(Vec<Group<V>>);

impl<V> TryFrom<Vec<Group<V>>> for Vector<V> {
    type Error = NewtypeError;

    fn try_from(groups: Vec<Group<V>>) -> Result<Self, Self::Error> {
        if groups.is_empty() {
            Err(NewtypeError::EmptyVector)
        } else {
            Ok(Self(groups))
        }
    }
}

impl<V> Vector<V> {
    /// Builds a single-group vector holding one identifier.
    pub fn singleton(value: V) -> Self {
        Self(vec![Group::singleton(value)])
    }

    /// Number of groups in this vector.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A `Vector` can never be empty; provided to satisfy
    /// `clippy::len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consumes the vector, returning its groups in order.
    pub fn into_inner(self) -> Vec<Group<V>> {
        self.0
    }
}

impl<V> Deref for Vector<V> {
    type Target = [Group<V>];

    fn deref(&self) -> &[Group<V>] {
        &self.0
    }
}

impl<V: fmt::Display> fmt::Display for Vector<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, g) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{g}")?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "serde")]
impl<V: Serialize> Serialize for Vector<V> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

#[cfg(feature = "serde")]
impl<'de, V: Deserialize<'de>> Deserialize<'de> for Vector<V> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let groups = Vec::<Group<V>>::deserialize(d)?;
        Self::try_from(groups).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
