//! Fragment payload data model.
//!
//! A [`FragmentPayload`] is one fragment's slice of the implementor index:
//! a mapping from [`GroupKey`] (a crate name) to the ordered
//! [`Implementor`] entries that fragment contributes for it.
//!
//! Both keys and implementors are opaque text. Nothing here looks inside the
//! pre-rendered markup.

use crate::{error::PayloadError, message::Message};
use std::{
    borrow::{Borrow, Cow},
    collections::BTreeMap,
    fmt,
};

/// Names a group of implementors, in practice a library crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(Cow<'static, str>);

impl GroupKey {
    /// Create a key from a static string without allocating.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for GroupKey {
    fn from(key: &'static str) -> Self {
        Self::from_static(key)
    }
}

impl From<String> for GroupKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl Borrow<str> for GroupKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pre-rendered trait implementation description.
///
/// Treated as an atomic leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Implementor(Cow<'static, str>);

impl Implementor {
    /// Create an implementor from static markup without allocating.
    pub const fn from_static(markup: &'static str) -> Self {
        Self(Cow::Borrowed(markup))
    }

    /// The rendered markup, untouched.
    pub fn markup(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Implementor {
    fn from(markup: &'static str) -> Self {
        Self::from_static(markup)
    }
}

impl From<String> for Implementor {
    fn from(markup: String) -> Self {
        Self(Cow::Owned(markup))
    }
}

impl AsRef<str> for Implementor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Implementor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape summary of a payload: how many groups and how many implementors each
/// one holds.
///
/// Lengths are implementor counts in key order, not serialized byte sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentLayout {
    /// Number of groups in the payload.
    pub groups: usize,
    /// Implementor count of each group.
    pub implementors_per_group: Vec<usize>,
}

impl FragmentLayout {
    /// Total number of implementors across all groups.
    pub fn total(&self) -> usize {
        self.implementors_per_group.iter().sum()
    }
}

/// One fragment's mapping from group key to its ordered implementors.
///
/// Keys are unique within a payload. Key order carries no meaning and is kept
/// sorted; the order of implementors inside a group is preserved exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentPayload {
    groups: BTreeMap<GroupKey, Vec<Implementor>>,
}

impl FragmentPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from `(key, implementors)` pairs.
    ///
    /// Fails on the first repeated key.
    pub fn from_groups<K, I, V>(groups: I) -> Result<Self, PayloadError>
    where
        K: Into<GroupKey>,
        I: IntoIterator<Item = (K, V)>,
        V: IntoIterator,
        V::Item: Into<Implementor>,
    {
        let mut payload = Self::new();
        for (key, implementors) in groups {
            payload.try_insert(key, implementors)?;
        }
        Ok(payload)
    }

    /// Build a payload from groups whose keys are already known to be distinct.
    ///
    /// Backs the `implementors!` expansion, which rejects repeated keys at
    /// compile time. Given a repeated key anyway, the last group wins.
    #[doc(hidden)]
    pub fn from_distinct_groups<const N: usize>(groups: [(GroupKey, Vec<Implementor>); N]) -> Self {
        Self {
            groups: BTreeMap::from(groups),
        }
    }

    /// Add a group, rejecting a key that is already present.
    pub fn try_insert<K, V>(&mut self, key: K, implementors: V) -> Result<(), PayloadError>
    where
        K: Into<GroupKey>,
        V: IntoIterator,
        V::Item: Into<Implementor>,
    {
        let key = key.into();
        if self.groups.contains_key(&key) {
            return Err(PayloadError::DuplicateGroup(key.to_string()));
        }
        self.groups
            .insert(key, implementors.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Implementors for one group, in fragment order.
    pub fn get(&self, key: &str) -> Option<&[Implementor]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Whether the payload carries a group.
    pub fn contains(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Iterate over group keys.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Iterate over groups and their implementors.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[Implementor])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the payload has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of implementors across every group.
    pub fn implementor_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Summarize the payload's shape.
    pub fn layout(&self) -> FragmentLayout {
        FragmentLayout {
            groups: self.groups.len(),
            implementors_per_group: self.groups.values().map(Vec::len).collect(),
        }
    }
}

impl IntoIterator for FragmentPayload {
    type Item = (GroupKey, Vec<Implementor>);
    type IntoIter = std::collections::btree_map::IntoIter<GroupKey, Vec<Implementor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl Message for FragmentPayload {}
