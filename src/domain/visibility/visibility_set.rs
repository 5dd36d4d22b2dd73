//! The hidden attribute codes of one export batch or render.

use std::collections::BTreeSet;

use super::IgnoredAttributes;

/// Static denylist unioned with the `notpublic` group's codes.
///
/// Computed once per batch/render and read-only afterwards. The two sources
/// stay distinguishable: the product sheet lets administrators see
/// `notpublic` codes, never denylisted ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    ignored: BTreeSet<String>,
    not_public: BTreeSet<String>,
}

impl VisibilitySet {
    pub fn new(ignored: &IgnoredAttributes, not_public: impl IntoIterator<Item = String>) -> Self {
        Self {
            ignored: ignored.codes().clone(),
            not_public: not_public.into_iter().collect(),
        }
    }

    /// A set made of denylisted codes only.
    pub fn from_codes(codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            ignored: codes.into_iter().collect(),
            not_public: BTreeSet::new(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.ignored.contains(code) || self.not_public.contains(code)
    }

    /// Hidden for every reader, whatever their role.
    pub fn is_ignored(&self, code: &str) -> bool {
        self.ignored.contains(code)
    }

    pub fn is_not_public(&self, code: &str) -> bool {
        self.not_public.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty() && self.not_public.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ignored.union(&self.not_public).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ignored.union(&self.not_public)
    }
}
