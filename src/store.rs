//! Peers cache of a DHT node running in server mode.
//!
//! A [PeerStore] is owned by the node's request handling loop, which serializes access to it.
//! Wrap it in a lock if it has to be shared between threads.

mod contact_set;
mod directory;
mod local_downloads;

use std::num::NonZeroUsize;

pub use contact_set::ContactSet;
pub use directory::PeerDirectory;
pub use local_downloads::LocalDownloads;

use crate::common::{InfoHash, PeerContact};

// Values inspired by jch's dht.c
pub const MAX_INFO_HASHES: usize = 16384;
pub const MAX_INFO_HASH_PEERS: usize = 2048;
/// Number of peers returned in a single `get_peers` response.
pub const K_NODES: usize = 8;

#[derive(Debug, Clone, Default)]
/// Capacity settings, a zero field falls back to its default.
pub struct PeerStoreSettings {
    /// The maximum info_hashes for which to store peers.
    ///
    /// Defaults to [MAX_INFO_HASHES]
    pub max_info_hashes: usize,
    /// The nominal maximum of peers to store per info_hash.
    ///
    /// Announces are rejected once an info_hash holds more than this many peers,
    /// so it can hold one more.
    ///
    /// Defaults to [MAX_INFO_HASH_PEERS]
    pub max_info_hash_peers: usize,
    /// The number of peers returned by [PeerDirectory::peer_contacts].
    ///
    /// Defaults to [K_NODES]
    pub k_nodes: usize,
}

impl PeerStoreSettings {
    pub fn max_info_hashes(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_info_hashes).unwrap_or(
            NonZeroUsize::new(MAX_INFO_HASHES).expect("MAX_INFO_HASHES is NonZeroUsize"),
        )
    }

    pub fn max_info_hash_peers(&self) -> usize {
        or_default(self.max_info_hash_peers, MAX_INFO_HASH_PEERS)
    }

    pub fn k_nodes(&self) -> usize {
        or_default(self.k_nodes, K_NODES)
    }
}

fn or_default(value: usize, default: usize) -> usize {
    if value == 0 {
        default
    } else {
        value
    }
}

#[derive(Debug, Default)]
/// Announced peers per info hash, and the info hashes this node is itself a peer for.
pub struct PeerStore {
    directory: PeerDirectory,
    local_downloads: LocalDownloads,
}

impl PeerStore {
    pub fn new(settings: &PeerStoreSettings) -> Self {
        Self {
            directory: PeerDirectory::new(settings),
            local_downloads: LocalDownloads::new(),
        }
    }

    pub fn directory(&mut self) -> &mut PeerDirectory {
        &mut self.directory
    }

    pub fn local_downloads(&self) -> &LocalDownloads {
        &self.local_downloads
    }

    /// See [PeerDirectory::size]
    pub fn size(&self) -> usize {
        self.directory.size()
    }

    /// See [PeerDirectory::get]
    pub fn get(&mut self, info_hash: &InfoHash) -> Option<&ContactSet> {
        self.directory.get(info_hash)
    }

    /// See [PeerDirectory::count]
    pub fn count(&mut self, info_hash: &InfoHash) -> usize {
        self.directory.count(info_hash)
    }

    /// See [PeerDirectory::peer_contacts]
    pub fn peer_contacts(&mut self, info_hash: &InfoHash) -> Vec<PeerContact> {
        self.directory.peer_contacts(info_hash)
    }

    /// See [PeerDirectory::add_contact]
    pub fn add_contact(&mut self, info_hash: InfoHash, contact: PeerContact) -> bool {
        self.directory.add_contact(info_hash, contact)
    }

    pub fn add_local_download(&mut self, info_hash: InfoHash) {
        self.local_downloads.add(info_hash)
    }

    pub fn has_local_download(&self, info_hash: &InfoHash) -> bool {
        self.local_downloads.contains(info_hash)
    }

    /// Values for a `get_peers` response.
    ///
    /// A sample of announced contacts, plus the `local` contact if this node is
    /// downloading `info_hash` itself. Returns None if there is nothing to return,
    /// in which case the response should carry closer nodes only.
    pub fn get_peers(
        &mut self,
        info_hash: &InfoHash,
        local: Option<&PeerContact>,
    ) -> Option<Vec<PeerContact>> {
        let mut peers = self.directory.peer_contacts(info_hash);

        if let Some(local) = local {
            if self.local_downloads.contains(info_hash) && !peers.contains(local) {
                peers.push(local.clone());
            }
        }

        if peers.is_empty() {
            return None;
        }

        Some(peers)
    }
}
