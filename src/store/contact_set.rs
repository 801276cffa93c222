//! Insertion ordered set of peer contacts for a single info hash.

use std::collections::HashSet;

use crate::common::PeerContact;

#[derive(Debug, Default, Clone)]
/// Unique peer contacts announced for one info hash.
///
/// Contacts are kept in insertion order so a contiguous window of them
/// is well defined for sampling, with a companion index for membership checks.
pub struct ContactSet {
    order: Vec<PeerContact>,
    index: HashSet<PeerContact>,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, contact: &PeerContact) -> bool {
        self.index.contains(contact)
    }

    /// Add a contact, returns false if it was already present.
    pub fn insert(&mut self, contact: PeerContact) -> bool {
        if !self.index.insert(contact.clone()) {
            return false;
        }

        self.order.push(contact);
        true
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PeerContact> {
        self.order.iter()
    }

    /// Up to `len` contiguous contacts starting at `offset`.
    pub fn window(&self, offset: usize, len: usize) -> &[PeerContact] {
        let start = offset.min(self.order.len());
        let end = start.saturating_add(len).min(self.order.len());

        &self.order[start..end]
    }
}

impl<'a> IntoIterator for &'a ContactSet {
    type Item = &'a PeerContact;
    type IntoIter = std::slice::Iter<'a, PeerContact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
