//! Exposure sets.

use std::collections::BTreeSet;

use crate::Name;

/// Set of global names an interface or member is exposed on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureSet(BTreeSet<Name>);

impl ExposureSet {
    pub fn new() -> Self {
        ExposureSet(BTreeSet::new())
    }

    pub fn insert(&mut self, name: Name) -> bool {
        self.0.insert(name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.0.contains(&name)
    }

    pub fn is_subset(&self, other: &ExposureSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Names in `self` that are missing from `other`.
    pub fn difference<'a>(&'a self, other: &'a ExposureSet) -> impl Iterator<Item = Name> + 'a {
        self.0.difference(&other.0).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Name> for ExposureSet {
    fn from_iter<I: IntoIterator<Item = Name>>(iter: I) -> Self {
        ExposureSet(iter.into_iter().collect())
    }
}

impl Extend<Name> for ExposureSet {
    fn extend<I: IntoIterator<Item = Name>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
