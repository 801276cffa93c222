//! Announced peers cache for BitTorrent's Mainline DHT nodes.
//!
//! Tracks which peers announced themselves for an info hash, bounded by LRU eviction of
//! info hashes, and serves small random subsets of them for `get_peers` responses.
//! It also remembers which info hashes the local node is downloading.
//!
//! Read [BEP_0005](https://www.bittorrent.org/beps/bep_0005.html) for more information.

mod common;
mod error;
pub mod store;

pub use crate::common::{InfoHash, PeerContact, COMPACT_V4_SIZE, COMPACT_V6_SIZE, INFO_HASH_SIZE};
pub use error::{Error, Result};
pub use store::{
    ContactSet, LocalDownloads, PeerDirectory, PeerStore, PeerStoreSettings, K_NODES,
    MAX_INFO_HASHES, MAX_INFO_HASH_PEERS,
};
