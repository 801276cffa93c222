//! Info hashes the local node is downloading, and thus a peer for.

use std::collections::HashSet;

use tracing::trace;

use crate::common::InfoHash;

#[derive(Debug, Default, Clone)]
pub struct LocalDownloads {
    info_hashes: HashSet<InfoHash>,
}

impl LocalDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the local node as downloading `info_hash`. Adding twice is a no-op.
    pub fn add(&mut self, info_hash: InfoHash) {
        if self.info_hashes.insert(info_hash) {
            trace!(?info_hash, "Added local download");
        }
    }

    pub fn contains(&self, info_hash: &InfoHash) -> bool {
        self.info_hashes.contains(info_hash)
    }

    pub fn len(&self) -> usize {
        self.info_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info_hashes.is_empty()
    }
}
